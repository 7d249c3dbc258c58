//! PDF rendering of laid-out reports.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use thiserror::Error;

use stockroom_inventory::MovementDetail;
use stockroom_products::Product;

use crate::layout::{Column, FONT_SIZE, PAGE_HEIGHT, PAGE_WIDTH, PageLayout, Report, layout};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("pdf rendering failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("pdf write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub fn products_report(products: &[Product]) -> Report {
    Report {
        title: "Reporte de Productos".into(),
        columns: vec![
            Column::new("Nombre", 30.0),
            Column::new("Descripción", 200.0),
            Column::new("Precio", 420.0),
            Column::new("Stock", 500.0),
        ],
        rows: products
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.description.clone().unwrap_or_default(),
                    p.price.to_string(),
                    p.stock.to_string(),
                ]
            })
            .collect(),
    }
}

pub fn movements_report(movements: &[MovementDetail]) -> Report {
    Report {
        title: "Reporte de Inventarios".into(),
        columns: vec![
            Column::new("Tipo", 30.0),
            Column::new("Producto", 120.0),
            Column::new("Cantidad", 300.0),
            Column::new("Fecha Actualización", 420.0),
        ],
        rows: movements
            .iter()
            .map(|d| {
                vec![
                    d.movement.kind.label().to_string(),
                    d.product_name.clone(),
                    d.movement.quantity.to_string(),
                    d.movement.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
                ]
            })
            .collect(),
    }
}

/// One log line per row, general entries first.
pub fn logs_report(general: &[String], errors: &[String]) -> Report {
    Report {
        title: "Registros del sistema".into(),
        columns: vec![Column::new("Entrada", 30.0)],
        rows: general
            .iter()
            .chain(errors)
            .map(|line| vec![line.clone()])
            .collect(),
    }
}

/// Base-14 fonts only cover WinAnsi; anything beyond Latin-1 becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn page_content(page: &PageLayout) -> Content {
    let mut operations = Vec::with_capacity(page.items.len() * 4 + 2);
    for item in &page.items {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
        operations.push(Operation::new("Td", vec![item.x.into(), item.y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(&item.text))]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Render a report into PDF bytes.
pub fn render(report: &Report) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for page in layout(report) {
        let content = page_content(&page);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
