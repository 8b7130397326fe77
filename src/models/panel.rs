use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[schema(as = Panel)]
#[sea_orm(table_name = "panels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub no_pp: String,
    pub no_panel: Option<String>,
    pub no_wbs: Option<String>,
    pub project: Option<String>,
    pub percent_progress: Option<f64>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub target_delivery: Option<chrono::DateTime<chrono::Utc>>,
    pub status_busbar_pcc: Option<String>,
    pub status_busbar_mcc: Option<String>,
    pub status_component: Option<String>,
    pub status_palet: Option<String>,
    pub status_corepart: Option<String>,
    pub ao_busbar_pcc: Option<chrono::DateTime<chrono::Utc>>,
    pub ao_busbar_mcc: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: Option<String>,
    /// Comma-separated company ids
    pub vendor_id: Option<String>,
    pub is_closed: bool,
    pub closed_date: Option<chrono::DateTime<chrono::Utc>>,
    pub panel_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::busbar::Entity")]
    Busbars,
    #[sea_orm(has_many = "super::component::Entity")]
    Components,
    #[sea_orm(has_many = "super::palet::Entity")]
    Palet,
    #[sea_orm(has_many = "super::corepart::Entity")]
    Corepart,
}

impl Related<super::busbar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Busbars.def()
    }
}

impl Related<super::component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Components.def()
    }
}

impl Related<super::palet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Palet.def()
    }
}

impl Related<super::corepart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Corepart.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
