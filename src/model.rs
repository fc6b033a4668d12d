use std::collections::BTreeMap;

use serde::Serialize;

/// One fully extracted food item. Serialized keys match the TBCA dataset's
/// original Portuguese field names so output files stay compatible with
/// downstream consumers of the original dump.
#[derive(Debug, Clone, Serialize)]
pub struct FoodItem {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "classe")]
    pub class: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "composicao_100g")]
    pub composition_100g: Vec<NutrientEntry>,
    #[serde(rename = "medidas_caseiras")]
    pub household_measures: Vec<MeasureRecord>,
}

/// A per-100g nutrient row. `value` stays as source text: the site mixes
/// decimal commas, thousands separators and markers like "tr" (traço), so
/// numeric parsing is left to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct NutrientEntry {
    #[serde(rename = "componente")]
    pub component: String,
    #[serde(rename = "unidade")]
    pub unit: String,
    #[serde(rename = "valor")]
    pub value: String,
}

/// One household measure column ("1 fatia (M) (80 g)") with its nutrient
/// values keyed by component name.
#[derive(Debug, Clone, Serialize)]
pub struct MeasureRecord {
    #[serde(rename = "descricao_medida")]
    pub description: String,
    #[serde(rename = "tamanho_medida")]
    pub size_qualifier: Option<String>,
    #[serde(rename = "gramas_equivalentes")]
    pub grams_equivalent: f64,
    #[serde(rename = "composicao")]
    pub composition: BTreeMap<String, MeasureValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeasureValue {
    #[serde(rename = "valor")]
    pub value: String,
    #[serde(rename = "unidade")]
    pub unit: String,
}
