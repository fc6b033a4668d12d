use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::header::{parse_measure_header, MeasureHeader};
use crate::error::ExtractError;
use crate::model::{FoodItem, MeasureRecord, MeasureValue, NutrientEntry};

/// First three table columns are always component / unit / per-100g value.
const FIXED_COLUMNS: usize = 3;

const DESCRIPTION_FALLBACK: &str = "Descrição não encontrada";

static OVERVIEW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h5#overview").unwrap());
static TABLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#tabela1").unwrap());
static TH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody tr").unwrap());
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Extract one food item from its parsed detail page.
///
/// Measure headers are kept as (original column index, parsed header) pairs
/// and row cells are indexed by that original column, so a header that fails
/// to parse mid-sequence cannot shift the values of later columns.
pub fn extract_food_item(doc: &Html, code: &str, class: &str) -> Result<FoodItem, ExtractError> {
    let description = extract_description(doc);

    let table = doc
        .select(&TABLE_SEL)
        .next()
        .ok_or(ExtractError::MissingTable)?;

    let headers: Vec<String> = table.select(&TH_SEL).map(cell_text).collect();
    let measures: Vec<(usize, MeasureHeader)> = headers
        .iter()
        .enumerate()
        .skip(FIXED_COLUMNS)
        .filter_map(|(col, text)| parse_measure_header(text).map(|h| (col, h)))
        .collect();

    let mut composition_100g: Vec<NutrientEntry> = Vec::new();
    let mut measure_values: Vec<BTreeMap<String, MeasureValue>> =
        vec![BTreeMap::new(); measures.len()];

    for row in table.select(&ROW_SEL) {
        let cells: Vec<String> = row.select(&TD_SEL).map(cell_text).collect();
        if cells.len() < FIXED_COLUMNS {
            continue;
        }

        let component = &cells[0];
        let unit = &cells[1];
        composition_100g.push(NutrientEntry {
            component: component.clone(),
            unit: unit.clone(),
            value: cells[2].clone(),
        });

        // A short row just leaves the missing measures unset for this component.
        for (slot, (col, _)) in measures.iter().enumerate() {
            if let Some(cell) = cells.get(*col) {
                measure_values[slot].insert(
                    component.clone(),
                    MeasureValue {
                        value: cell.clone(),
                        unit: unit.clone(),
                    },
                );
            }
        }
    }

    let household_measures = measures
        .into_iter()
        .zip(measure_values)
        .map(|((_, h), composition)| MeasureRecord {
            description: h.description,
            size_qualifier: h.size_qualifier,
            grams_equivalent: h.grams,
            composition,
        })
        .collect();

    Ok(FoodItem {
        code: code.to_string(),
        class: class.to_string(),
        description,
        composition_100g,
        household_measures,
    })
}

/// The overview element reads "Descrição: <name> << voltar". Missing element
/// or marker falls back to a sentinel rather than failing the item.
fn extract_description(doc: &Html) -> String {
    doc.select(&OVERVIEW_SEL)
        .next()
        .and_then(|el| {
            let text: String = el.text().collect();
            let after = text.split("Descrição:").nth(1)?;
            Some(after.split("<<").next().unwrap_or(after).trim().to_string())
        })
        .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string())
}

fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──
