//! Cooperative members

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    #[sea_orm(unique)]
    pub membership_number: String,
    pub join_date: Date,
    pub status: String,
    pub employment_status: String,
    pub employer_name: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub share_percentage: Decimal,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
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
    pub fn into_member(self) -> crate::models::members::entities::Member {
        use crate::models::members::entities::{EmploymentStatus, Member, MemberStatus};

        Member {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            membership_number: self.membership_number,
            join_date: self.join_date,
            status: self
                .status
                .parse::<MemberStatus>()
                .unwrap_or(MemberStatus::Active),
            employment_status: self
                .employment_status
                .parse::<EmploymentStatus>()
                .unwrap_or(EmploymentStatus::Private),
            employer_name: self.employer_name,
            share_percentage: self.share_percentage,
            bank_name: self.bank_name,
            account_number: self.account_number,
            rib: self.rib,
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
