use super::{CatalogError, CatalogListing};
use crate::scoring::{MaterialShare, ProductInput};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// One material line of the products export; a product spans as many rows
/// as it has materials.
#[derive(Debug, Deserialize)]
struct ProductRow {
    #[serde(rename = "Id")]
    id: u64,
    #[serde(rename = "Product_Name")]
    product_name: String,
    #[serde(rename = "Brand", default)]
    brand: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Subcategory", default)]
    subcategory: String,
    #[serde(rename = "Price", default)]
    price: String,
    #[serde(rename = "Material")]
    material: String,
    #[serde(rename = "Percentage_Material")]
    percentage: f64,
    #[serde(rename = "Origin")]
    origin: String,
    #[serde(rename = "Care_Instruction")]
    care_instruction: String,
    #[serde(rename = "Certification1", default)]
    certification1: String,
    #[serde(rename = "Certification2", default)]
    certification2: String,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses the export and folds rows sharing an `Id` into one listing, in
/// order of first appearance. Product-level columns come from the first row.
pub(crate) fn parse_listings<R: Read>(reader: R) -> Result<Vec<CatalogListing>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut listings: Vec<CatalogListing> = Vec::new();
    let mut positions: HashMap<u64, usize> = HashMap::new();

    for record in csv_reader.deserialize::<ProductRow>() {
        let row = record?;
        let share = MaterialShare::new(row.material.trim(), row.percentage);

        if let Some(&position) = positions.get(&row.id) {
            listings[position].input.materials.push(share);
            continue;
        }

        let mut input = ProductInput::new(
            row.product_name.trim(),
            row.origin.trim(),
            row.care_instruction.trim(),
        );
        input.brand = non_blank(row.brand);
        input.category = non_blank(row.category);
        input.subcategory = non_blank(row.subcategory);
        input.certification1 = non_blank(row.certification1);
        input.certification2 = non_blank(row.certification2);
        input.materials.push(share);

        positions.insert(row.id, listings.len());
        listings.push(CatalogListing {
            id: row.id,
            price: non_blank(row.price),
            input,
        });
    }

    Ok(listings)
}
