//! The service-order row model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Embedded contact record, denormalized into the client columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
}

/// One service order as returned by the remote store.
///
/// Known fields are typed; anything else the remote sends lands in `extra`
/// so a column added server-side still renders without a code change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    pub id: Option<i64>,
    pub numero_ordem_servico: Option<String>,
    pub situacao: Option<String>,
    pub data_emissao: Option<NaiveDate>,
    pub data_prevista: Option<NaiveDate>,
    pub data_conclusao: Option<NaiveDate>,
    pub total_servicos: Option<f64>,
    pub total_ordem_servico: Option<f64>,
    pub total_pecas: Option<f64>,
    pub equipamento: Option<String>,
    pub equipamento_serie: Option<String>,
    pub tecnico: Option<String>,
    pub linha_dispositivo: Option<String>,
    pub tipo_servico: Option<String>,
    pub origem_cliente: Option<String>,
    pub descricao_problema: Option<String>,
    pub observacoes: Option<String>,
    pub observacoes_internas: Option<String>,
    /// Embedded contact join.
    pub contatos: Option<Contact>,
    /// Tag names attached after the row fetch.
    #[serde(default)]
    pub marcadores: Vec<String>,
    /// Fields the remote sent that we do not model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ServiceOrder {
    /// Look up a cell value by column id. Synthetic columns (the contact
    /// trio and the tag list) are derived here; unknown ids fall through to
    /// the extension map.
    pub fn value(&self, column_id: &str) -> Option<Value> {
        fn text(s: &Option<String>) -> Option<Value> {
            s.as_ref().map(|v| Value::String(v.clone()))
        }
        fn date(d: &Option<NaiveDate>) -> Option<Value> {
            d.map(|v| Value::String(v.format("%Y-%m-%d").to_string()))
        }
        fn number(n: &Option<f64>) -> Option<Value> {
            n.and_then(|v| serde_json::Number::from_f64(v).map(Value::Number))
        }

        match column_id {
            "id" => self.id.map(Value::from),
            "numero_ordem_servico" => text(&self.numero_ordem_servico),
            "situacao" => text(&self.situacao),
            "data_emissao" => date(&self.data_emissao),
            "data_prevista" => date(&self.data_prevista),
            "data_conclusao" => date(&self.data_conclusao),
            "total_servicos" => number(&self.total_servicos),
            "total_ordem_servico" => number(&self.total_ordem_servico),
            "total_pecas" => number(&self.total_pecas),
            "equipamento" => text(&self.equipamento),
            "equipamento_serie" => text(&self.equipamento_serie),
            "tecnico" => text(&self.tecnico),
            "linha_dispositivo" => text(&self.linha_dispositivo),
            "tipo_servico" => text(&self.tipo_servico),
            "origem_cliente" => text(&self.origem_cliente),
            "descricao_problema" => text(&self.descricao_problema),
            "observacoes" => text(&self.observacoes),
            "observacoes_internas" => text(&self.observacoes_internas),
            "nome_cliente" => text(&self.contatos.as_ref()?.nome),
            "telefone_cliente" => text(&self.contatos.as_ref()?.telefone),
            "email_cliente" => text(&self.contatos.as_ref()?.email),
            "marcadores" => Some(Value::Array(
                self.marcadores
                    .iter()
                    .map(|t| Value::String(t.clone()))
                    .collect(),
            )),
            other => self.extra.get(other).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> Value {
        json!({
            "id": 42,
            "numero_ordem_servico": "OS-1234",
            "situacao": "Em andamento",
            "data_emissao": "2024-06-10",
            "total_ordem_servico": 150.75,
            "tecnico": "Maria",
            "contatos": {
                "nome": "João Silva",
                "telefone": "(11) 99999-0000",
                "email": "joao@example.com"
            },
            "campo_novo": "valor extra"
        })
    }

    #[test]
    fn test_deserialize_known_and_extra_fields() {
        let order: ServiceOrder = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(order.id, Some(42));
        assert_eq!(order.numero_ordem_servico.as_deref(), Some("OS-1234"));
        assert_eq!(
            order.data_emissao,
            NaiveDate::from_ymd_opt(2024, 6, 10)
        );
        assert_eq!(order.extra.get("campo_novo"), Some(&json!("valor extra")));
    }

    #[test]
    fn test_value_maps_synthetic_contact_columns() {
        let order: ServiceOrder = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(order.value("nome_cliente"), Some(json!("João Silva")));
        assert_eq!(order.value("telefone_cliente"), Some(json!("(11) 99999-0000")));
        assert_eq!(order.value("email_cliente"), Some(json!("joao@example.com")));
    }

    #[test]
    fn test_value_without_contact_is_none() {
        let order = ServiceOrder::default();
        assert_eq!(order.value("nome_cliente"), None);
    }

    #[test]
    fn test_value_dates_are_iso_strings() {
        let order: ServiceOrder = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(order.value("data_emissao"), Some(json!("2024-06-10")));
        assert_eq!(order.value("data_prevista"), None);
    }

    #[test]
    fn test_value_tags_always_present_as_array() {
        let mut order = ServiceOrder::default();
        assert_eq!(order.value("marcadores"), Some(json!([])));
        order.marcadores = vec!["vip".to_string()];
        assert_eq!(order.value("marcadores"), Some(json!(["vip"])));
    }

    #[test]
    fn test_value_falls_through_to_extension_map() {
        let order: ServiceOrder = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(order.value("campo_novo"), Some(json!("valor extra")));
        assert_eq!(order.value("inexistente"), None);
    }

    #[test]
    fn test_tolerates_null_heavy_rows() {
        let order: ServiceOrder = serde_json::from_value(json!({
            "id": null,
            "numero_ordem_servico": null,
            "contatos": null
        }))
        .unwrap();
        assert_eq!(order.id, None);
        assert_eq!(order.value("numero_ordem_servico"), None);
    }
}
