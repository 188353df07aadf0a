//! 结构化输出的响应 schema
//!
//! 计分表的八个字段在编译期固定，发送请求时再转换成推理服务所需的 schema JSON。

use serde_json::{json, Map, Value};

/// 字段的取值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 字符串数组
    StringArray,
    /// 数值数组
    NumberArray,
}

impl FieldKind {
    fn item_type(self) -> &'static str {
        match self {
            FieldKind::StringArray => "STRING",
            FieldKind::NumberArray => "NUMBER",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            FieldKind::StringArray => "strings",
            FieldKind::NumberArray => "numbers",
        }
    }
}

/// schema 中的一个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    /// JSON 字段名
    pub name: &'static str,
    /// 计分卡上印的行名
    pub label: &'static str,
    pub kind: FieldKind,
}

impl SchemaField {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }

    pub fn description(&self) -> String {
        format!("List of {} for {} row", self.kind.noun(), self.label)
    }
}

/// 对象 schema：所有字段均为必填数组
#[derive(Debug, Clone, Copy)]
pub struct ResponseSchema {
    pub fields: &'static [SchemaField],
}

const SCORE_TABLE_FIELDS: [SchemaField; 8] = [
    SchemaField::new("multi_player", "Multi-player", FieldKind::StringArray),
    SchemaField::new("vogels", "Vogels", FieldKind::NumberArray),
    SchemaField::new("bonuskaarten", "Bonuskaarten", FieldKind::NumberArray),
    SchemaField::new("einde_ronde_doelen", "'Einde ronde'-Doelen", FieldKind::NumberArray),
    SchemaField::new("eieren", "Eieren", FieldKind::NumberArray),
    SchemaField::new("voedsel_op_kaarten", "Voedsel op kaarten", FieldKind::NumberArray),
    SchemaField::new("weggestopte_kaarten", "Weggestopte kaarten", FieldKind::NumberArray),
    SchemaField::new("totaal", "Totaal", FieldKind::NumberArray),
];

/// 计分表 schema，与 [`crate::models::ScoreTable`] 字段一一对应
pub const SCORE_TABLE_SCHEMA: ResponseSchema = ResponseSchema {
    fields: &SCORE_TABLE_FIELDS,
};

impl ResponseSchema {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// 推理服务所需的 schema JSON
    ///
    /// `propertyOrdering` 保持计分卡上的行顺序
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| {
                let property = json!({
                    "type": "ARRAY",
                    "items": {"type": field.kind.item_type()},
                    "description": field.description(),
                });
                (field.name.to_string(), property)
            })
            .collect();
        let names: Vec<&str> = self.field_names().collect();

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": names,
            "propertyOrdering": names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreTable;

    #[test]
    fn test_all_fields_required() {
        let value = SCORE_TABLE_SCHEMA.to_json();
        assert_eq!(value["type"], "OBJECT");
        assert_eq!(
            value["required"],
            json!([
                "multi_player",
                "vogels",
                "bonuskaarten",
                "einde_ronde_doelen",
                "eieren",
                "voedsel_op_kaarten",
                "weggestopte_kaarten",
                "totaal"
            ])
        );
        assert_eq!(value["properties"].as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_field_kinds() {
        let value = SCORE_TABLE_SCHEMA.to_json();
        assert_eq!(
            value["properties"]["multi_player"],
            json!({
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "List of strings for Multi-player row"
            })
        );
        assert_eq!(value["properties"]["totaal"]["items"]["type"], "NUMBER");
        assert_eq!(
            value["properties"]["vogels"]["description"],
            "List of numbers for Vogels row"
        );
    }

    #[test]
    fn test_schema_matches_score_table() {
        // 按 schema 字段构造的对象必须能反序列化为 ScoreTable
        let mut object = serde_json::Map::new();
        for field in SCORE_TABLE_SCHEMA.fields {
            let row = match field.kind {
                FieldKind::StringArray => json!(["Alice"]),
                FieldKind::NumberArray => json!([1]),
            };
            object.insert(field.name.to_string(), row);
        }
        let table: ScoreTable = serde_json::from_value(object.into()).unwrap();
        assert_eq!(table.multi_player, vec!["Alice".to_string()]);
    }
}
