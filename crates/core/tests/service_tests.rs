// ═══════════════════════════════════════════════════════════════════
// Store, reorder, cell-editor, and metrics tests — the synchronous
// calculation core, exercised without the facade.
// ═══════════════════════════════════════════════════════════════════

use recipe_costing_core::models::additional_cost::{AdditionalCost, AdditionalCostField};
use recipe_costing_core::models::product::{Product, ProductField};
use recipe_costing_core::models::recipe::Recipe;
use recipe_costing_core::services::cell_editor::{CellEditor, CellField};
use recipe_costing_core::services::cost_service::CostService;
use recipe_costing_core::services::metrics_service::MetricsService;
use recipe_costing_core::services::product_service::ProductService;
use recipe_costing_core::services::reorder;

fn flour() -> Product {
    Product::new("Flour")
        .with_pricing(0.0, 100.0, 50.0)
        .with_catalog_price(5.0)
}

fn sugar() -> Product {
    Product::new("Sugar").with_pricing(2.0, 100.0, 50.0)
}

fn cocoa() -> Product {
    Product::new("Cocoa").with_pricing(8.0, 250.0, 30.0)
}

fn box_cost() -> AdditionalCost {
    AdditionalCost::new("Box").with_costing(1.0, 2.0, 1.0)
}

// ═══════════════════════════════════════════════════════════════════
//  ProductService (LineItemStore)
// ═══════════════════════════════════════════════════════════════════

mod product_store {
    use super::*;

    #[test]
    fn add_assigns_one_when_empty() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        let id = service.add(&mut recipe, flour());
        assert_eq!(id, 1);
        assert_eq!(recipe.products[0].id, 1);
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        service.add(&mut recipe, flour());
        service.add(&mut recipe, sugar());
        let removed_id = recipe.products[0].id;
        service.remove(&mut recipe, removed_id);
        // max of remaining ids is 2, so the next id is 3 — ids are never reused downward
        let id = service.add(&mut recipe, cocoa());
        assert_eq!(id, 3);
    }

    #[test]
    fn add_appends_to_the_end() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        service.add(&mut recipe, flour());
        service.add(&mut recipe, sugar());
        assert_eq!(recipe.products[1].name, "Sugar");
    }

    #[test]
    fn add_derives_before_insertion() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        service.add(&mut recipe, flour());
        // never visible with a stale derived value
        assert_eq!(recipe.products[0].line_cost, 2.5);
    }

    #[test]
    fn update_pricing_field_recomputes_line_cost() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        let id = service.add(&mut recipe, flour());
        service.update(&mut recipe, id, ProductField::UserPrice(3.0));
        assert_eq!(recipe.products[0].line_cost, 1.5);
    }

    #[test]
    fn update_usage_recomputes_line_cost() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        let id = service.add(&mut recipe, flour());
        service.update(&mut recipe, id, ProductField::RecipeUsage(100.0));
        assert_eq!(recipe.products[0].line_cost, 5.0);
    }

    #[test]
    fn update_supplier_leaves_line_cost_alone() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        let id = service.add(&mut recipe, flour());
        service.update(&mut recipe, id, ProductField::Supplier(Some("Mill & Co".into())));
        assert_eq!(recipe.products[0].line_cost, 2.5);
        assert_eq!(recipe.products[0].supplier.as_deref(), Some("Mill & Co"));
    }

    #[test]
    fn update_missing_id_is_a_noop() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        service.add(&mut recipe, flour());
        let before = recipe.clone();
        service.update(&mut recipe, 99, ProductField::UserPrice(100.0));
        assert_eq!(recipe, before);
    }

    #[test]
    fn remove_missing_id_is_a_noop() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        service.add(&mut recipe, flour());
        service.remove(&mut recipe, 99);
        assert_eq!(recipe.products.len(), 1);
    }

    #[test]
    fn remove_preserves_order_of_survivors() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        service.add(&mut recipe, flour());
        let middle = service.add(&mut recipe, sugar());
        service.add(&mut recipe, cocoa());
        service.remove(&mut recipe, middle);
        let names: Vec<&str> = recipe.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Flour", "Cocoa"]);
    }

    #[test]
    fn set_catalog_price_recomputes_line_cost() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        let id = service.add(&mut recipe, Product::new("Flour").with_pricing(0.0, 100.0, 50.0));
        assert_eq!(recipe.products[0].line_cost, 0.0);
        service.set_catalog_price(&mut recipe, id, Some(5.0));
        assert_eq!(recipe.products[0].catalog_price, Some(5.0));
        assert_eq!(recipe.products[0].line_cost, 2.5);
    }

    #[test]
    fn clearing_catalog_price_drops_fallback() {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        let id = service.add(&mut recipe, flour());
        service.set_catalog_price(&mut recipe, id, None);
        assert_eq!(recipe.products[0].line_cost, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CostService (AdditionalCostStore)
// ═══════════════════════════════════════════════════════════════════

mod cost_store {
    use super::*;

    #[test]
    fn add_assigns_ids_and_derives() {
        let mut recipe = Recipe::new("r");
        let service = CostService::new();
        let id = service.add(&mut recipe, box_cost());
        assert_eq!(id, 1);
        assert_eq!(recipe.additional_costs[0].unit_cost, 0.5);
        assert_eq!(recipe.additional_costs[0].total, 0.5);
    }

    #[test]
    fn update_recomputes_chain() {
        let mut recipe = Recipe::new("r");
        let service = CostService::new();
        let id = service.add(&mut recipe, box_cost());
        service.update(&mut recipe, id, AdditionalCostField::UnitsUsed(4.0));
        assert_eq!(recipe.additional_costs[0].total, 2.0);
    }

    #[test]
    fn update_description_leaves_totals_alone() {
        let mut recipe = Recipe::new("r");
        let service = CostService::new();
        let id = service.add(&mut recipe, box_cost());
        service.update(&mut recipe, id, AdditionalCostField::Description("Carton".into()));
        assert_eq!(recipe.additional_costs[0].description, "Carton");
        assert_eq!(recipe.additional_costs[0].total, 0.5);
    }

    #[test]
    fn zeroing_units_per_package_degrades_totals() {
        let mut recipe = Recipe::new("r");
        let service = CostService::new();
        let id = service.add(&mut recipe, box_cost());
        service.update(&mut recipe, id, AdditionalCostField::UnitsPerPackage(0.0));
        assert_eq!(recipe.additional_costs[0].unit_cost, 0.0);
        assert_eq!(recipe.additional_costs[0].total, 0.0);
    }

    #[test]
    fn update_missing_id_is_a_noop() {
        let mut recipe = Recipe::new("r");
        let service = CostService::new();
        service.add(&mut recipe, box_cost());
        let before = recipe.clone();
        service.update(&mut recipe, 42, AdditionalCostField::PackageCost(9.0));
        assert_eq!(recipe, before);
    }

    #[test]
    fn remove_preserves_order() {
        let mut recipe = Recipe::new("r");
        let service = CostService::new();
        service.add(&mut recipe, AdditionalCost::new("Box"));
        let middle = service.add(&mut recipe, AdditionalCost::new("Label"));
        service.add(&mut recipe, AdditionalCost::new("Gas"));
        service.remove(&mut recipe, middle);
        let descriptions: Vec<&str> = recipe
            .additional_costs
            .iter()
            .map(|c| c.description.as_str())
            .collect();
        assert_eq!(descriptions, ["Box", "Gas"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Reorder
// ═══════════════════════════════════════════════════════════════════

mod reordering {
    use super::*;

    fn three_products() -> Recipe {
        let mut recipe = Recipe::new("r");
        let service = ProductService::new();
        service.add(&mut recipe, flour());
        service.add(&mut recipe, sugar());
        service.add(&mut recipe, cocoa());
        recipe
    }

    #[test]
    fn move_first_to_last() {
        let mut recipe = three_products();
        reorder::move_item(&mut recipe.products, 1, 2);
        let ids: Vec<u32> = recipe.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn move_last_to_front() {
        let mut recipe = three_products();
        reorder::move_item(&mut recipe.products, 3, 0);
        let ids: Vec<u32> = recipe.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, [3, 1, 2]);
    }

    #[test]
    fn move_preserves_identity_and_derived_fields() {
        let mut recipe = three_products();
        let before: Vec<Product> = recipe.products.clone();
        reorder::move_item(&mut recipe.products, 1, 2);
        // same items, every field intact — only the order changed
        for p in &before {
            assert!(recipe.products.contains(p));
        }
    }

    #[test]
    fn move_leaves_metrics_unchanged() {
        let mut recipe = three_products();
        recipe.parameters.produced_quantity = 8.0;
        let service = MetricsService::new();
        let before = service.compute(&recipe);
        reorder::move_item(&mut recipe.products, 1, 2);
        assert_eq!(service.compute(&recipe), before);
    }

    #[test]
    fn same_index_is_a_noop() {
        let mut recipe = three_products();
        let before = recipe.products.clone();
        reorder::move_item(&mut recipe.products, 2, 1);
        assert_eq!(recipe.products, before);
    }

    #[test]
    fn missing_id_is_a_noop() {
        let mut recipe = three_products();
        let before = recipe.products.clone();
        reorder::move_item(&mut recipe.products, 99, 0);
        assert_eq!(recipe.products, before);
    }

    #[test]
    fn target_beyond_end_clamps_to_last() {
        let mut recipe = three_products();
        reorder::move_item(&mut recipe.products, 1, 50);
        let ids: Vec<u32> = recipe.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn works_for_additional_costs_too() {
        let mut recipe = Recipe::new("r");
        let service = CostService::new();
        service.add(&mut recipe, AdditionalCost::new("Box"));
        service.add(&mut recipe, AdditionalCost::new("Label"));
        reorder::move_item(&mut recipe.additional_costs, 2, 0);
        assert_eq!(recipe.additional_costs[0].description, "Label");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CellEditor
// ═══════════════════════════════════════════════════════════════════

mod cell_editor {
    use super::*;

    #[test]
    fn start_edit_activates_cell() {
        let mut editor = CellEditor::new();
        assert!(editor.start_edit(1, CellField::ProductName));
        assert_eq!(editor.active_cell(), Some((1, CellField::ProductName)));
    }

    #[test]
    fn derived_columns_are_rejected() {
        let mut editor = CellEditor::new();
        for field in [
            CellField::ProductCatalogPrice,
            CellField::ProductLineCost,
            CellField::CostUnitCost,
            CellField::CostTotal,
        ] {
            assert!(!editor.start_edit(1, field));
            assert_eq!(editor.active_cell(), None);
        }
    }

    #[test]
    fn single_focus_invariant() {
        let mut editor = CellEditor::new();
        editor.start_edit(1, CellField::ProductName);
        editor.start_edit(2, CellField::ProductUserPrice);
        // the second start wins; never two active cells
        assert_eq!(editor.active_cell(), Some((2, CellField::ProductUserPrice)));
    }

    #[test]
    fn starting_a_new_edit_clears_pending_text() {
        let mut editor = CellEditor::new();
        editor.start_edit(1, CellField::ProductName);
        editor.type_text("Flo");
        editor.start_edit(2, CellField::ProductName);
        assert_eq!(editor.pending_text(), "");
    }

    #[test]
    fn type_then_commit_produces_the_edit() {
        let mut editor = CellEditor::new();
        editor.start_edit(1, CellField::ProductUserPrice);
        editor.type_text("3.5");
        let edit = editor.commit().unwrap();
        assert_eq!(edit.item_id, 1);
        assert_eq!(edit.field, CellField::ProductUserPrice);
        assert_eq!(edit.text, "3.5");
        assert_eq!(editor.active_cell(), None);
    }

    #[test]
    fn commit_without_active_cell_is_none() {
        let mut editor = CellEditor::new();
        assert!(editor.commit().is_none());
    }

    #[test]
    fn cancel_discards_without_committing() {
        let mut editor = CellEditor::new();
        editor.start_edit(1, CellField::ProductName);
        editor.type_text("half-typed");
        editor.cancel();
        assert_eq!(editor.active_cell(), None);
        assert!(editor.commit().is_none());
    }

    #[test]
    fn typing_without_active_cell_is_ignored() {
        let mut editor = CellEditor::new();
        editor.type_text("stray");
        assert_eq!(editor.pending_text(), "");
    }

    #[test]
    fn numeric_column_classification() {
        assert!(CellField::ProductUserPrice.is_numeric());
        assert!(CellField::CostUnitsUsed.is_numeric());
        assert!(!CellField::ProductName.is_numeric());
        assert!(!CellField::ProductSupplier.is_numeric());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MetricsService (DerivedMetricsCalculator)
// ═══════════════════════════════════════════════════════════════════

mod metrics {
    use super::*;

    /// Two products with line costs 2.5 and 1.0, one additional cost
    /// totaling 0.5, yield 8, 0.27 expense, 50% margin.
    fn reference_recipe() -> Recipe {
        let mut recipe = Recipe::new("Brownies");
        let products = ProductService::new();
        let costs = CostService::new();
        products.add(&mut recipe, flour()); // 5 * 50 / 100 = 2.5
        products.add(&mut recipe, sugar()); // 2 * 50 / 100 = 1.0
        costs.add(&mut recipe, box_cost()); // 1/2 * 1 = 0.5
        recipe.parameters.produced_quantity = 8.0;
        recipe.parameters.operating_expense_per_unit = 0.27;
        recipe.parameters.profit_margin_percent = 50.0;
        recipe
    }

    #[test]
    fn compute_is_deterministic() {
        let recipe = reference_recipe();
        let service = MetricsService::new();
        // bit-identical on repeated invocation with identical input
        assert_eq!(service.compute(&recipe), service.compute(&recipe));
    }

    #[test]
    fn reference_totals() {
        let m = MetricsService::new().compute(&reference_recipe());
        assert_eq!(m.total_line_item_cost, 3.5);
        assert_eq!(m.total_additional_cost, 0.5);
        assert_eq!(m.total_cost, 4.0);
    }

    #[test]
    fn reference_unit_cost_and_price() {
        let m = MetricsService::new().compute(&reference_recipe());
        assert_eq!(m.unit_cost, 0.77); // 4.0/8 + 0.27
        assert_eq!(m.suggested_price, 1.155); // 0.77 * 1.5
    }

    #[test]
    fn reference_revenue_and_profits() {
        let m = MetricsService::new().compute(&reference_recipe());
        assert_eq!(m.total_revenue, 9.24); // 1.155 * 8
        assert_eq!(m.gross_profit, 5.24); // (1.155 - 0.5) * 8
        assert_eq!(m.net_profit, 3.08); // (1.155 - 0.77) * 8
    }

    #[test]
    fn reference_margins() {
        let m = MetricsService::new().compute(&reference_recipe());
        assert_eq!(m.gross_margin_percent, 56.71);
        assert_eq!(m.net_margin_percent, 33.33);
    }

    #[test]
    fn zero_produced_quantity_guards_the_chain() {
        let mut recipe = reference_recipe();
        recipe.parameters.produced_quantity = 0.0;
        let m = MetricsService::new().compute(&recipe);
        assert_eq!(m.total_cost, 4.0); // totals still stand
        assert_eq!(m.unit_cost, 0.0);
        assert_eq!(m.suggested_price, 0.0);
        assert_eq!(m.total_revenue, 0.0);
        assert_eq!(m.gross_profit, 0.0);
        assert_eq!(m.net_profit, 0.0);
        // no price means no margin to express
        assert_eq!(m.gross_margin_percent, 0.0);
        assert_eq!(m.net_margin_percent, 0.0);
    }

    #[test]
    fn empty_recipe_is_all_zeros() {
        let m = MetricsService::new().compute(&Recipe::new("empty"));
        assert_eq!(m.total_line_item_cost, 0.0);
        assert_eq!(m.total_additional_cost, 0.0);
        assert_eq!(m.total_cost, 0.0);
        assert_eq!(m.unit_cost, 0.0);
        assert_eq!(m.suggested_price, 0.0);
        assert_eq!(m.net_margin_percent, 0.0);
    }

    #[test]
    fn expense_applies_even_with_zero_line_costs() {
        let mut recipe = Recipe::new("r");
        recipe.parameters.produced_quantity = 4.0;
        recipe.parameters.operating_expense_per_unit = 0.5;
        let m = MetricsService::new().compute(&recipe);
        assert_eq!(m.unit_cost, 0.5);
    }

    #[test]
    fn margin_marks_up_unit_cost() {
        let mut recipe = Recipe::new("r");
        let products = ProductService::new();
        products.add(&mut recipe, Product::new("Flour").with_pricing(4.0, 100.0, 100.0));
        recipe.parameters.produced_quantity = 1.0;
        recipe.parameters.profit_margin_percent = 25.0;
        let m = MetricsService::new().compute(&recipe);
        assert_eq!(m.unit_cost, 4.0);
        assert_eq!(m.suggested_price, 5.0);
        assert_eq!(m.net_margin_percent, 20.0); // 1.0 / 5.0
    }
}
