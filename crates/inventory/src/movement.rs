use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, FieldErrors, MovementId, ProductId};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "salida")]
    Outbound,
}

impl MovementKind {
    /// Stored/wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Inbound => "entrada",
            MovementKind::Outbound => "salida",
        }
    }

    /// Human-facing label used on reports.
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Inbound => "Entrada",
            MovementKind::Outbound => "Salida",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrada" => Ok(MovementKind::Inbound),
            "salida" => Ok(MovementKind::Outbound),
            other => Err(DomainError::field(
                "tipo",
                format!("\"{other}\" is not a valid choice"),
            )),
        }
    }
}

/// A recorded stock movement. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: MovementId,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "producto")]
    pub product: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "fecha_actualizacion")]
    pub recorded_at: DateTime<Utc>,
}

impl Entity for InventoryMovement {
    type Id = MovementId;

    fn id(&self) -> MovementId {
        self.id
    }
}

/// Payload for recording a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovement {
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "producto")]
    pub product: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
}

impl NewMovement {
    pub fn inbound(product: ProductId, quantity: i64) -> Self {
        Self { kind: MovementKind::Inbound, product, quantity }
    }

    pub fn outbound(product: ProductId, quantity: i64) -> Self {
        Self { kind: MovementKind::Outbound, product, quantity }
    }

    pub fn validated(self) -> DomainResult<Self> {
        let mut errors = FieldErrors::new();
        if self.quantity <= 0 {
            errors.add("cantidad", "ensure this value is greater than 0");
        }
        errors.into_result()?;
        Ok(self)
    }

    pub fn into_movement(self, id: MovementId, recorded_at: DateTime<Utc>) -> InventoryMovement {
        InventoryMovement {
            id,
            kind: self.kind,
            product: self.product,
            quantity: self.quantity,
            recorded_at,
        }
    }
}

/// A movement joined with the name of the product it moved, for listings
/// and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementDetail {
    #[serde(flatten)]
    pub movement: InventoryMovement,
    #[serde(rename = "producto_nombre")]
    pub product_name: String,
}
