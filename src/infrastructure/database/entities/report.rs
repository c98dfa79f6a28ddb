//! Report entity for database
//!
//! The envelope columns (id, form type, status, created_at) are typed; the
//! per-form fields live in the `payload` JSON column, keeping the table
//! schema stable across form kinds.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Report status column values (stored as the display strings)
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
pub enum ReportStatus {
    #[sea_orm(string_value = "Pendiente")]
    Pendiente,
    #[sea_orm(string_value = "En Progreso")]
    EnProgreso,
    #[sea_orm(string_value = "Esperando Repuestos")]
    EsperandoRepuestos,
    #[sea_orm(string_value = "Completado")]
    Completado,
    #[sea_orm(string_value = "Cancelado")]
    Cancelado,
}

/// Form type discriminator column
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum FormType {
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "repair")]
    Repair,
    #[sea_orm(string_value = "inspection")]
    Inspection,
    #[sea_orm(string_value = "work-order")]
    WorkOrder,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub form_type: FormType,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub payload: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
