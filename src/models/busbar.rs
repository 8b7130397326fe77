use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema,
)]
#[schema(as = Busbar)]
#[sea_orm(table_name = "busbars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub panel_no_pp: String,
    pub vendor: String,
    pub remarks: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::panel::Entity",
        from = "Column::PanelNoPp",
        to = "super::panel::Column::NoPp",
        on_delete = "Cascade"
    )]
    Panel,
}

impl Related<super::panel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Panel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
