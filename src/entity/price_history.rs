use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    #[sea_orm(string_value = "created")]
    Created,
    #[sea_orm(string_value = "updated")]
    Updated,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

impl ChangeType {
    /// Localized label used by the exported reports.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Created => "Criado",
            ChangeType::Updated => "Atualizado",
            ChangeType::Deleted => "Removido",
        }
    }
}

/// Append-only audit log. Rows are never updated or deleted, and the table
/// has no foreign keys so entries outlive the entities they refer to.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "price_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub competitor_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub previous_value: Option<Decimal>,
    /// None marks a deletion event.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub new_value: Option<Decimal>,
    pub changed_by: i32,
    pub change_type: ChangeType,
    pub changed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
