//! Profit shares paid to members

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "member_distributions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub member_id: i64,
    pub monthly_financial_id: i64,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub share_percentage: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub status: String,
    pub is_public_employee: bool,
    pub payment_date: Option<Date>,
    pub payment_reference: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id",
        on_delete = "Cascade"
    )]
    Member,
    #[sea_orm(
        belongs_to = "super::monthly_financials::Entity",
        from = "Column::MonthlyFinancialId",
        to = "super::monthly_financials::Column::Id",
        on_delete = "Cascade"
    )]
    MonthlyFinancial,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<super::monthly_financials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyFinancial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_distribution(
        self,
        member_name: Option<String>,
    ) -> crate::models::financials::entities::MemberDistribution {
        use crate::models::financials::entities::{DistributionStatus, MemberDistribution};

        MemberDistribution {
            id: self.id,
            member_id: self.member_id,
            member_name,
            monthly_financial_id: self.monthly_financial_id,
            share_percentage: self.share_percentage,
            amount: self.amount,
            status: self
                .status
                .parse::<DistributionStatus>()
                .unwrap_or(DistributionStatus::Pending),
            is_public_employee: self.is_public_employee,
            payment_date: self.payment_date,
            payment_reference: self.payment_reference,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
