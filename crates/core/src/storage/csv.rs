//! CSV serialization of a recipe.
//!
//! The document has three sections in fixed order, each introduced by a
//! literal header line and a column-header line, separated by blank lines:
//!
//! ```text
//! Products:
//! id,name,userPrice,catalogPrice,presentationSize,recipeUsage,lineCost
//! <rows...>
//!
//! AdditionalCosts:
//! id,description,packageCost,unitsPerPackage,unitCost,unitsUsed,total
//! <rows...>
//!
//! Recipe:
//! name,producedQuantity,operatingExpensePerUnit,profitMarginPercent
//! <single row>
//! ```
//!
//! `decode` is symmetric with `encode` and additionally accepts a
//! products-only document (the legacy flat ingredient-table import shape):
//! when the first non-blank line is not a section header, the whole
//! document is read as a Products table.

use crate::models::additional_cost::AdditionalCost;
use crate::models::product::Product;
use crate::models::recipe::Recipe;
use crate::numeric::parse_number;

pub const PRODUCTS_HEADER: &str = "Products:";
pub const ADDITIONAL_COSTS_HEADER: &str = "AdditionalCosts:";
pub const RECIPE_HEADER: &str = "Recipe:";

const PRODUCT_COLUMNS: &str = "id,name,userPrice,catalogPrice,presentationSize,recipeUsage,lineCost";
const COST_COLUMNS: &str = "id,description,packageCost,unitsPerPackage,unitCost,unitsUsed,total";
const RECIPE_COLUMNS: &str = "name,producedQuantity,operatingExpensePerUnit,profitMarginPercent";

// Minimum columns a row needs before it is skipped. Trailing derived
// columns may be absent; they are re-derived on import anyway.
const MIN_PRODUCT_COLUMNS: usize = 6;
const MIN_COST_COLUMNS: usize = 6;
const MIN_RECIPE_COLUMNS: usize = 4;

/// Serialize a recipe to the three-section CSV document.
pub fn encode(recipe: &Recipe) -> String {
    let mut out = String::new();

    out.push_str(PRODUCTS_HEADER);
    out.push('\n');
    out.push_str(PRODUCT_COLUMNS);
    out.push('\n');
    for p in &recipe.products {
        let catalog = p.catalog_price.map(|c| c.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            p.id,
            quote(&p.name),
            p.user_price,
            catalog,
            p.presentation_size,
            p.recipe_usage,
            p.line_cost,
        ));
    }

    out.push('\n');
    out.push_str(ADDITIONAL_COSTS_HEADER);
    out.push('\n');
    out.push_str(COST_COLUMNS);
    out.push('\n');
    for c in &recipe.additional_costs {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            c.id,
            quote(&c.description),
            c.package_cost,
            c.units_per_package,
            c.unit_cost,
            c.units_used,
            c.total,
        ));
    }

    out.push('\n');
    out.push_str(RECIPE_HEADER);
    out.push('\n');
    out.push_str(RECIPE_COLUMNS);
    out.push('\n');
    let params = &recipe.parameters;
    out.push_str(&format!(
        "{},{},{},{}\n",
        quote(&params.name),
        params.produced_quantity,
        params.operating_expense_per_unit,
        params.profit_margin_percent,
    ));

    out
}

/// Parse a CSV document back into a recipe.
///
/// Never fails: blank lines are discarded, rows with too few columns are
/// logged and skipped, bad numeric text becomes zero, and missing
/// sections leave their part of the recipe at its default. Derived
/// columns in the file are ignored and re-derived.
pub fn decode(text: &str) -> Recipe {
    let mut recipe = Recipe::default();

    let mut section = Section::Products;
    let mut expect_columns = false;
    let mut first_content_line = true;

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some(next) = section_for(line) {
            section = next;
            expect_columns = true;
            first_content_line = false;
            continue;
        }

        if first_content_line {
            // No leading section header: legacy flat ingredient table.
            // The first line is still a column header.
            first_content_line = false;
            continue;
        }
        if expect_columns {
            expect_columns = false;
            continue;
        }

        let fields = split_record(line);
        match section {
            Section::Products => {
                if fields.len() < MIN_PRODUCT_COLUMNS {
                    tracing::warn!(
                        columns = fields.len(),
                        line,
                        "skipping short row in Products section"
                    );
                    continue;
                }
                let mut product = Product::new(fields[1].clone());
                product.id = parse_number(&fields[0]) as u32;
                product.user_price = parse_number(&fields[2]);
                product.catalog_price = if fields[3].trim().is_empty() {
                    None
                } else {
                    Some(parse_number(&fields[3]))
                };
                product.presentation_size = parse_number(&fields[4]);
                product.recipe_usage = parse_number(&fields[5]);
                product.derive_line_cost();
                recipe.products.push(product);
            }
            Section::AdditionalCosts => {
                if fields.len() < MIN_COST_COLUMNS {
                    tracing::warn!(
                        columns = fields.len(),
                        line,
                        "skipping short row in AdditionalCosts section"
                    );
                    continue;
                }
                let mut cost = AdditionalCost::new(fields[1].clone());
                cost.id = parse_number(&fields[0]) as u32;
                cost.package_cost = parse_number(&fields[2]);
                cost.units_per_package = parse_number(&fields[3]);
                cost.units_used = parse_number(&fields[5]);
                cost.derive();
                recipe.additional_costs.push(cost);
            }
            Section::Recipe => {
                if fields.len() < MIN_RECIPE_COLUMNS {
                    tracing::warn!(
                        columns = fields.len(),
                        line,
                        "skipping short row in Recipe section"
                    );
                    continue;
                }
                recipe.parameters.name = fields[0].clone();
                recipe.parameters.produced_quantity = parse_number(&fields[1]);
                recipe.parameters.operating_expense_per_unit = parse_number(&fields[2]);
                recipe.parameters.profit_margin_percent = parse_number(&fields[3]);
            }
        }
    }

    recipe
}

#[derive(Clone, Copy)]
enum Section {
    Products,
    AdditionalCosts,
    Recipe,
}

fn section_for(line: &str) -> Option<Section> {
    match line.trim() {
        PRODUCTS_HEADER => Some(Section::Products),
        ADDITIONAL_COSTS_HEADER => Some(Section::AdditionalCosts),
        RECIPE_HEADER => Some(Section::Recipe),
        _ => None,
    }
}

/// Text columns are always quoted; inner quotes are doubled.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Split one CSV record on commas, honoring double-quoted fields.
/// Surrounding quotes are stripped; doubled quotes collapse to one.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
