//! Query construction and fetch orchestration.
//!
//! Builds the PostgREST parameter set from the filter state and the visible
//! columns, runs the order query, then resolves each row's tags with one
//! lookup per row. A failed tag lookup degrades that row to an empty tag
//! list instead of failing the whole fetch.

use crate::api_client::{ApiClient, ApiClientError, OrderQuery};
use ordex_core::{ColumnRegistry, FilterState, ServiceOrder};

/// Fields every query needs regardless of visible columns: `id` keys the
/// marker lookups, `id_contato` keys the contact embed.
const REQUIRED_FIELDS: [&str; 2] = ["id", "id_contato"];

/// PostgREST embed clause for the contact join, always fetched so contact
/// columns toggled on later render without a refetch.
const CONTACT_EMBED: &str = "contatos(nome,telefone,email)";

/// Columns that do not exist on the orders table; they are derived
/// client-side from the embed or the marker lookups.
const SYNTHETIC_COLUMNS: [&str; 4] = [
    "nome_cliente",
    "telefone_cliente",
    "email_cliente",
    "marcadores",
];

/// Build the order query for the current filters and visible columns.
pub fn build_order_query(filter: &FilterState, registry: &ColumnRegistry) -> OrderQuery {
    let mut fields: Vec<&str> = Vec::new();
    for field in REQUIRED_FIELDS {
        fields.push(field);
    }
    for column in registry.visible() {
        if SYNTHETIC_COLUMNS.contains(&column.id) {
            continue;
        }
        if !fields.contains(&column.id) {
            fields.push(column.id);
        }
    }

    let mut select = fields.join(",");
    select.push(',');
    select.push_str(CONTACT_EMBED);

    let mut predicates = Vec::new();
    predicates.push((
        "data_emissao".to_string(),
        format!("gte.{}", filter.start_date.format("%Y-%m-%d")),
    ));
    predicates.push((
        "data_emissao".to_string(),
        format!("lte.{}", filter.end_date.format("%Y-%m-%d")),
    ));
    if !filter.status.is_empty() {
        predicates.push(("situacao".to_string(), format!("eq.{}", filter.status)));
    }
    if let Some((field, value)) = filter.dynamic_pair() {
        predicates.push((field.to_string(), format!("ilike.*{}*", value)));
    }
    predicates.push(("order".to_string(), "data_emissao.desc".to_string()));

    OrderQuery { select, predicates }
}

/// Run the order query and resolve tags for every row.
pub async fn fetch_orders(
    api: &ApiClient,
    filter: &FilterState,
    registry: &ColumnRegistry,
) -> Result<Vec<ServiceOrder>, ApiClientError> {
    let correlation_id = uuid::Uuid::now_v7();
    let query = build_order_query(filter, registry);
    tracing::info!(
        %correlation_id,
        select = %query.select,
        predicates = query.predicates.len(),
        "fetching orders"
    );

    let mut orders = api.fetch_orders(&query).await?;
    tracing::info!(%correlation_id, rows = orders.len(), "orders fetched");

    // Rows are augmented with their tags at fetch time, whatever the current
    // column visibility: toggling the tag column on later must not require a
    // refetch.
    let targets = marker_targets(&orders);
    tracing::debug!(%correlation_id, tag_lookups = targets.len(), "resolving tags");
    for order in &mut orders {
        if let Some(id) = order.id {
            let result = api.fetch_markers(id).await;
            apply_marker_result(order, id, result);
        }
    }

    Ok(orders)
}

/// The rows a fetch resolves tags for: every row that has an id. Column
/// visibility plays no part in this.
fn marker_targets(orders: &[ServiceOrder]) -> Vec<i64> {
    orders.iter().filter_map(|o| o.id).collect()
}

/// Attach a marker lookup result to its row. Errors degrade to an empty tag
/// list so one bad lookup cannot sink a whole result set.
fn apply_marker_result(
    order: &mut ServiceOrder,
    order_id: i64,
    result: Result<Vec<String>, ApiClientError>,
) {
    match result {
        Ok(markers) => order.marcadores = markers,
        Err(err) => {
            tracing::warn!(order_id, error = %err, "marker lookup failed, rendering row without tags");
            order.marcadores = Vec::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ordex_core::DatePreset;

    fn filter() -> FilterState {
        FilterState::new(
            DatePreset::Week,
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        )
    }

    fn predicate<'a>(query: &'a OrderQuery, key: &str) -> Vec<&'a str> {
        query
            .predicates
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    // ========================================================================
    // Projection
    // ========================================================================

    #[test]
    fn test_select_contains_required_fields_and_embed() {
        let query = build_order_query(&filter(), &ColumnRegistry::with_defaults());
        assert!(query.select.starts_with("id,id_contato"));
        assert!(query.select.ends_with(CONTACT_EMBED));
    }

    #[test]
    fn test_select_skips_synthetic_and_hidden_columns() {
        let mut registry = ColumnRegistry::with_defaults();
        registry.set_visible("nome_cliente", false);
        let query = build_order_query(&filter(), &registry);

        // Synthetic columns never appear as bare fields.
        assert!(!query.select.contains("marcadores"));
        assert!(!query.select.contains("nome_cliente"));
        assert!(!query.select.contains("data_prevista"));
        assert!(query.select.contains("tecnico"));
    }

    #[test]
    fn test_contact_embed_added_exactly_once() {
        let mut registry = ColumnRegistry::with_defaults();
        registry.set_visible("telefone_cliente", true);
        registry.set_visible("email_cliente", true);
        let query = build_order_query(&filter(), &registry);

        assert_eq!(query.select.matches("contatos(").count(), 1);
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    #[test]
    fn test_date_range_predicates() {
        let query = build_order_query(&filter(), &ColumnRegistry::with_defaults());
        assert_eq!(
            predicate(&query, "data_emissao"),
            vec!["gte.2024-06-03", "lte.2024-06-10"]
        );
    }

    #[test]
    fn test_status_predicate_only_when_set() {
        let registry = ColumnRegistry::with_defaults();
        let mut filter = filter();

        let query = build_order_query(&filter, &registry);
        assert!(predicate(&query, "situacao").is_empty());

        filter.status = "Finalizada".to_string();
        let query = build_order_query(&filter, &registry);
        assert_eq!(predicate(&query, "situacao"), vec!["eq.Finalizada"]);
    }

    #[test]
    fn test_dynamic_predicate_uses_ilike_wildcards() {
        let registry = ColumnRegistry::with_defaults();
        let mut filter = filter();
        filter.set_dynamic_field("tecnico");
        filter.dynamic_value = "maria".to_string();

        let query = build_order_query(&filter, &registry);
        assert_eq!(predicate(&query, "tecnico"), vec!["ilike.*maria*"]);
    }

    #[test]
    fn test_dynamic_predicate_requires_value() {
        let registry = ColumnRegistry::with_defaults();
        let mut filter = filter();
        filter.set_dynamic_field("tecnico");

        let query = build_order_query(&filter, &registry);
        assert!(predicate(&query, "tecnico").is_empty());
    }

    #[test]
    fn test_orders_newest_first() {
        let query = build_order_query(&filter(), &ColumnRegistry::with_defaults());
        assert_eq!(predicate(&query, "order"), vec!["data_emissao.desc"]);
    }

    // ========================================================================
    // Marker lookups
    // ========================================================================

    #[test]
    fn test_tag_lookups_cover_every_row_regardless_of_visibility() {
        // The lookup set derives from the rows alone, so hiding the tag
        // column cannot suppress fetch-time augmentation.
        let orders = vec![
            ServiceOrder {
                id: Some(1),
                ..ServiceOrder::default()
            },
            ServiceOrder {
                id: None,
                ..ServiceOrder::default()
            },
            ServiceOrder {
                id: Some(3),
                ..ServiceOrder::default()
            },
        ];
        assert_eq!(marker_targets(&orders), vec![1, 3]);
    }

    #[test]
    fn test_failed_marker_lookup_degrades_to_empty_tags() {
        let mut order = ServiceOrder {
            id: Some(7),
            marcadores: vec!["stale".to_string()],
            ..ServiceOrder::default()
        };
        apply_marker_result(
            &mut order,
            7,
            Err(ApiClientError::InvalidResponse("HTTP 500".to_string())),
        );
        assert!(order.marcadores.is_empty());
    }

    #[test]
    fn test_successful_marker_lookup_attaches_tags() {
        let mut order = ServiceOrder {
            id: Some(7),
            ..ServiceOrder::default()
        };
        apply_marker_result(&mut order, 7, Ok(vec!["vip".to_string(), "garantia".to_string()]));
        assert_eq!(order.marcadores, vec!["vip", "garantia"]);
    }
}
