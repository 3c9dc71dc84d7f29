//! Column registry: the ordered, toggleable set of table columns.
//!
//! The registry owns display order and visibility. Reordering operates over
//! the visible subset only; hidden columns keep their relative order after
//! all visible ones. The anchor column can never be hidden.

use crate::format;
use crate::prefs::ColumnPrefs;
use serde_json::Value;

/// The one column the user cannot hide.
pub const ANCHOR_COLUMN: &str = "numero_ordem_servico";

/// Cell renderer attached to a column.
pub type RenderFn = fn(&Value) -> String;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Stable key into the row record.
    pub id: &'static str,
    pub label: &'static str,
    pub visible: bool,
    pub render: Option<RenderFn>,
}

impl ColumnDescriptor {
    const fn new(id: &'static str, label: &'static str, visible: bool) -> Self {
        Self {
            id,
            label,
            visible,
            render: None,
        }
    }

    const fn rendered(
        id: &'static str,
        label: &'static str,
        visible: bool,
        render: RenderFn,
    ) -> Self {
        Self {
            id,
            label,
            visible,
            render: Some(render),
        }
    }
}

/// Which half of the target header the pointer was over when dropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRegistry {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnRegistry {
    /// The default column set of the service-order table, in default order.
    /// Client-side denormalized columns (contact fields, tags) come last.
    pub fn with_defaults() -> Self {
        Self {
            columns: vec![
                ColumnDescriptor::new("id", "ID", true),
                ColumnDescriptor::new(ANCHOR_COLUMN, "Número OS", true),
                ColumnDescriptor::new("situacao", "Status", true),
                ColumnDescriptor::rendered("data_emissao", "Data Emissão", true, format::render_date),
                ColumnDescriptor::rendered("data_prevista", "Data Prevista", false, format::render_date),
                ColumnDescriptor::rendered("data_conclusao", "Data Conclusão", false, format::render_date),
                ColumnDescriptor::rendered(
                    "total_ordem_servico",
                    "Valor Total",
                    true,
                    format::render_currency,
                ),
                ColumnDescriptor::rendered(
                    "total_servicos",
                    "Valor Serviços",
                    false,
                    format::render_currency,
                ),
                ColumnDescriptor::rendered("total_pecas", "Valor Peças", false, format::render_currency),
                ColumnDescriptor::new("equipamento", "Equipamento", true),
                ColumnDescriptor::new("equipamento_serie", "Série", false),
                ColumnDescriptor::new("tecnico", "Técnico", true),
                ColumnDescriptor::new("linha_dispositivo", "Linha/Dispositivo", false),
                ColumnDescriptor::new("tipo_servico", "Tipo de Serviço", false),
                ColumnDescriptor::new("origem_cliente", "Origem do Cliente", false),
                ColumnDescriptor::new("descricao_problema", "Descrição do Problema", false),
                ColumnDescriptor::new("observacoes", "Observações", false),
                ColumnDescriptor::new("observacoes_internas", "Observações Internas", false),
                ColumnDescriptor::new("nome_cliente", "Cliente", true),
                ColumnDescriptor::new("telefone_cliente", "Telefone", false),
                ColumnDescriptor::new("email_cliente", "E-mail", false),
                ColumnDescriptor::rendered("marcadores", "Marcadores", true, format::render_tags),
            ],
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn visible(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn descriptor(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Set a column's visibility. Anchor and unknown ids are silent no-ops.
    /// Returns whether the registry changed, so the caller knows to persist.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        if id == ANCHOR_COLUMN {
            return false;
        }
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(column) if column.visible != visible => {
                column.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Move the visible column at `from` next to the visible column at `to`,
    /// on the given side of it. Hidden columns keep their relative order
    /// after all visible ones. Out-of-range indices and moves that resolve
    /// to the original position are no-ops. Returns whether order changed.
    pub fn reorder(&mut self, from: usize, to: usize, side: DropSide) -> bool {
        let visible: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| i)
            .collect();
        if from >= visible.len() || to >= visible.len() {
            return false;
        }

        // Resolve the drop edge to an insertion slot, then compensate for
        // the removal of the dragged entry from the same list.
        let mut insert = match side {
            DropSide::Left => to,
            DropSide::Right => to + 1,
        };
        if insert > from {
            insert -= 1;
        }
        if insert == from {
            return false;
        }

        let mut order = visible.clone();
        let dragged = order.remove(from);
        order.insert(insert, dragged);

        let hidden: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.visible)
            .map(|(i, _)| i)
            .collect();

        let mut next = Vec::with_capacity(self.columns.len());
        for index in order.into_iter().chain(hidden) {
            next.push(self.columns[index].clone());
        }
        self.columns = next;
        true
    }

    /// Current order and visibility as a persistable snapshot.
    pub fn snapshot(&self) -> ColumnPrefs {
        ColumnPrefs {
            visibility: self
                .columns
                .iter()
                .map(|c| (c.id.to_string(), c.visible))
                .collect(),
            order: self.columns.iter().map(|c| c.id.to_string()).collect(),
        }
    }

    /// Apply persisted order and visibility. Persisted ids unknown to the
    /// registry are ignored; registry ids missing from the persisted order
    /// are appended at the end in their default relative order. The anchor
    /// column stays visible no matter what the preferences claim.
    pub fn load(&mut self, prefs: &ColumnPrefs) {
        let mut next: Vec<ColumnDescriptor> = Vec::with_capacity(self.columns.len());
        for id in &prefs.order {
            if next.iter().any(|c| c.id == id.as_str()) {
                continue;
            }
            if let Some(column) = self.columns.iter().find(|c| c.id == id.as_str()) {
                next.push(column.clone());
            }
        }
        for column in &self.columns {
            if !next.iter().any(|c| c.id == column.id) {
                next.push(column.clone());
            }
        }
        self.columns = next;

        for column in &mut self.columns {
            if column.id == ANCHOR_COLUMN {
                column.visible = true;
                continue;
            }
            if let Some(visible) = prefs.visibility.get(column.id) {
                column.visible = *visible;
            }
        }
    }
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_ids(registry: &ColumnRegistry) -> Vec<&'static str> {
        registry.visible().map(|c| c.id).collect()
    }

    fn hidden_ids(registry: &ColumnRegistry) -> Vec<&'static str> {
        registry.columns().iter().filter(|c| !c.visible).map(|c| c.id).collect()
    }

    // ========================================================================
    // Defaults
    // ========================================================================

    #[test]
    fn test_default_ids_are_unique() {
        let registry = ColumnRegistry::with_defaults();
        let mut ids: Vec<&str> = registry.columns().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry.columns().len());
    }

    #[test]
    fn test_anchor_visible_by_default() {
        let registry = ColumnRegistry::with_defaults();
        assert!(registry.descriptor(ANCHOR_COLUMN).unwrap().visible);
    }

    // ========================================================================
    // set_visible
    // ========================================================================

    #[test]
    fn test_set_visible_toggles_and_reports_change() {
        let mut registry = ColumnRegistry::with_defaults();
        assert!(registry.set_visible("tecnico", false));
        assert!(!registry.descriptor("tecnico").unwrap().visible);
        // Same value again: no change to persist.
        assert!(!registry.set_visible("tecnico", false));
    }

    #[test]
    fn test_set_visible_anchor_is_noop() {
        let mut registry = ColumnRegistry::with_defaults();
        assert!(!registry.set_visible(ANCHOR_COLUMN, false));
        assert!(registry.descriptor(ANCHOR_COLUMN).unwrap().visible);
    }

    #[test]
    fn test_set_visible_unknown_is_noop() {
        let mut registry = ColumnRegistry::with_defaults();
        assert!(!registry.set_visible("no_such_column", true));
    }

    // ========================================================================
    // reorder
    // ========================================================================

    #[test]
    fn test_reorder_moves_left_of_target() {
        let mut registry = ColumnRegistry::with_defaults();
        let before = visible_ids(&registry);

        assert!(registry.reorder(0, 2, DropSide::Left));

        let after = visible_ids(&registry);
        assert_eq!(after[1], before[0]);
        assert_eq!(after[0], before[1]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn test_reorder_right_of_target() {
        let mut registry = ColumnRegistry::with_defaults();
        let before = visible_ids(&registry);

        assert!(registry.reorder(0, 2, DropSide::Right));

        let after = visible_ids(&registry);
        assert_eq!(after[2], before[0]);
        assert_eq!(after[0], before[1]);
        assert_eq!(after[1], before[2]);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut registry = ColumnRegistry::with_defaults();
        let before = visible_ids(&registry);

        assert!(!registry.reorder(3, 3, DropSide::Left));
        assert_eq!(visible_ids(&registry), before);
    }

    #[test]
    fn test_reorder_right_of_left_neighbor_is_noop() {
        // Dropping on the right half of your immediate left neighbor resolves
        // to the position you started from.
        let mut registry = ColumnRegistry::with_defaults();
        let before = visible_ids(&registry);

        assert!(!registry.reorder(2, 1, DropSide::Right));
        assert_eq!(visible_ids(&registry), before);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut registry = ColumnRegistry::with_defaults();
        let before = visible_ids(&registry);
        let count = registry.visible_count();

        assert!(!registry.reorder(count, 0, DropSide::Left));
        assert!(!registry.reorder(0, count, DropSide::Left));
        assert_eq!(visible_ids(&registry), before);
    }

    #[test]
    fn test_reorder_preserves_hidden_relative_order() {
        let mut registry = ColumnRegistry::with_defaults();
        let hidden_before = hidden_ids(&registry);

        assert!(registry.reorder(0, 4, DropSide::Right));

        assert_eq!(hidden_ids(&registry), hidden_before);
        // Hidden columns all sit after the visible block.
        let first_hidden = registry
            .columns()
            .iter()
            .position(|c| !c.visible)
            .unwrap();
        assert!(registry.columns()[first_hidden..].iter().all(|c| !c.visible));
    }

    // ========================================================================
    // snapshot / load
    // ========================================================================

    #[test]
    fn test_load_snapshot_round_trip() {
        let mut registry = ColumnRegistry::with_defaults();
        registry.set_visible("tecnico", false);
        registry.set_visible("total_pecas", true);
        registry.reorder(0, 3, DropSide::Right);

        let snapshot = registry.snapshot();
        let mut restored = ColumnRegistry::with_defaults();
        restored.load(&snapshot);

        assert_eq!(restored, registry);
    }

    #[test]
    fn test_load_ignores_unknown_ids() {
        let mut registry = ColumnRegistry::with_defaults();
        let mut prefs = registry.snapshot();
        prefs.order.insert(0, "ghost_column".to_string());
        prefs.visibility.insert("ghost_column".to_string(), true);

        let before = ColumnRegistry::with_defaults();
        registry.load(&prefs);

        assert_eq!(registry, before);
    }

    #[test]
    fn test_load_appends_newly_introduced_columns() {
        // Simulate preferences written before `marcadores` existed.
        let mut registry = ColumnRegistry::with_defaults();
        let mut prefs = registry.snapshot();
        prefs.order.retain(|id| id != "marcadores");
        prefs.visibility.remove("marcadores");

        registry.load(&prefs);

        assert_eq!(registry.columns().last().unwrap().id, "marcadores");
        // Registry default visibility kept for the missing id.
        assert!(registry.descriptor("marcadores").unwrap().visible);
    }

    #[test]
    fn test_load_never_hides_anchor() {
        let mut registry = ColumnRegistry::with_defaults();
        let mut prefs = registry.snapshot();
        prefs.visibility.insert(ANCHOR_COLUMN.to_string(), false);

        registry.load(&prefs);

        assert!(registry.descriptor(ANCHOR_COLUMN).unwrap().visible);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
