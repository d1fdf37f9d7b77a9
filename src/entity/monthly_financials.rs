//! Monthly profit and loss

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "monthly_financials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub period_month: Date,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_revenue: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub instructor_payments: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub operational_expenses: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub other_expenses: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_expenses: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub gross_profit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub retained_earnings_percentage: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub retained_earnings: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub distributable_profit: Decimal,
    pub is_finalized: bool,
    pub finalized_date: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::member_distributions::Entity")]
    MemberDistributions,
}

impl Related<super::member_distributions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberDistributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_monthly(self) -> crate::models::financials::entities::MonthlyFinancial {
        crate::models::financials::entities::MonthlyFinancial {
            id: self.id,
            period_month: self.period_month,
            total_revenue: self.total_revenue,
            instructor_payments: self.instructor_payments,
            operational_expenses: self.operational_expenses,
            other_expenses: self.other_expenses,
            total_expenses: self.total_expenses,
            gross_profit: self.gross_profit,
            retained_earnings_percentage: self.retained_earnings_percentage,
            retained_earnings: self.retained_earnings,
            distributable_profit: self.distributable_profit,
            is_finalized: self.is_finalized,
            finalized_date: self.finalized_date.map(super::ts_to_datetime),
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
