//! Instructor payroll, monthly profit, member distributions, expenses and
//! budgets.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{
    budget_allocations, course_instructors, courses, expenses, instructor_payments, instructors,
    member_distributions, members, monthly_financials, payments,
};
use crate::errors::{CoopError, Result};
use crate::finance::{
    Period,
    payroll::compute_instructor_pay,
    profit::{ProfitInputs, ShareHolder, compute_profit_split, distribute},
    round_money, today,
};
use crate::models::{
    PaginatedResponse, page_params,
    financials::{
        entities::{
            BudgetAllocation, DistributionStatus, Expense, ExpenseStatus, InstructorPayment,
            InstructorPaymentStatus, MemberDistribution, MonthlyFinancial,
        },
        requests::{
            BudgetListQuery, CreateBudgetRequest, CreateExpenseRequest, DistributionListQuery,
            ExpenseListQuery, InstructorPaymentListQuery, MonthlyFinancialListQuery,
            PaymentDetails, UpdateBudgetRequest, UpdateExpenseRequest,
        },
    },
    instructors::entities::InstructorStatus,
    members::entities::MemberStatus,
    payments::entities::PaymentStatus,
};
use crate::utils::escape_like_pattern;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// Period parsed from an optional request field; expenses and budgets
/// default to the current month.
pub(crate) fn period_or_current(raw: Option<&str>, fallback: NaiveDate) -> Result<Period> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Period::parse(raw),
        None => Ok(Period::containing(fallback)),
    }
}

async fn ensure_not_finalized(txn: &DatabaseTransaction, period: Period) -> Result<()> {
    let finalized = monthly_financials::Entity::find()
        .filter(monthly_financials::Column::PeriodMonth.eq(period.first_day()))
        .filter(monthly_financials::Column::IsFinalized.eq(true))
        .one(txn)
        .await
        .map_err(db_error("Failed to check period"))?;

    match finalized {
        Some(_) => Err(CoopError::period_finalized(format!(
            "Period {} is finalized and cannot be recalculated",
            period.label()
        ))),
        None => Ok(()),
    }
}

async fn sum_decimal<C, E>(conn: &C, select: sea_orm::Select<E>, column: E::Column) -> Result<Decimal>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let values: Vec<Decimal> = select
        .select_only()
        .column(column)
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("Failed to aggregate amounts"))?;

    Ok(values.into_iter().sum())
}

async fn instructor_names<C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<HashMap<i64, String>> {
    let rows: Vec<(i64, String)> = instructors::Entity::find()
        .select_only()
        .column(instructors::Column::Id)
        .column(instructors::Column::FullName)
        .filter(instructors::Column::Id.is_in(ids.iter().copied()))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("Failed to load instructor names"))?;

    Ok(rows.into_iter().collect())
}

async fn member_names<C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<HashMap<i64, String>> {
    let rows: Vec<(i64, String)> = members::Entity::find()
        .select_only()
        .column(members::Column::Id)
        .column(members::Column::FullName)
        .filter(members::Column::Id.is_in(ids.iter().copied()))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("Failed to load member names"))?;

    Ok(rows.into_iter().collect())
}

async fn named_instructor_payments<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<instructor_payments::Model>,
) -> Result<Vec<InstructorPayment>> {
    let ids: Vec<i64> = rows.iter().map(|r| r.instructor_id).collect();
    let names = instructor_names(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let name = names.get(&r.instructor_id).cloned();
            r.into_instructor_payment(name)
        })
        .collect())
}

async fn named_distributions<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<member_distributions::Model>,
) -> Result<Vec<MemberDistribution>> {
    let ids: Vec<i64> = rows.iter().map(|r| r.member_id).collect();
    let names = member_names(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let name = names.get(&r.member_id).cloned();
            r.into_distribution(name)
        })
        .collect())
}

impl SeaOrmStorage {
    /// Paid student money received during the period.
    pub async fn period_revenue_impl(&self, period: Period) -> Result<Decimal> {
        Self::revenue_in(&self.db, period).await
    }

    async fn revenue_in<C: ConnectionTrait>(conn: &C, period: Period) -> Result<Decimal> {
        let select = payments::Entity::find()
            .filter(payments::Column::Status.eq(PaymentStatus::Paid.to_string()))
            .filter(payments::Column::PaymentDate.gte(period.first_day()))
            .filter(payments::Column::PaymentDate.lte(period.last_day()));
        sum_decimal(conn, select, payments::Column::AmountPaid).await
    }

    /// Hours per active instructor over assignments whose course overlaps the period.
    async fn period_hours<C: ConnectionTrait>(
        conn: &C,
        period: Period,
    ) -> Result<BTreeMap<i64, Decimal>> {
        let rows = course_instructors::Entity::find()
            .find_also_related(courses::Entity)
            .filter(courses::Column::StartDate.lte(period.last_day()))
            .filter(courses::Column::EndDate.gte(period.first_day()))
            .all(conn)
            .await
            .map_err(db_error("Failed to load course assignments"))?;

        let mut hours: BTreeMap<i64, Decimal> = BTreeMap::new();
        for (assignment, course) in rows {
            if course.is_some_and(|c| period.overlaps(c.start_date, c.end_date)) {
                *hours.entry(assignment.instructor_id).or_default() += assignment.hours_taught;
            }
        }
        Ok(hours)
    }

    /// Computes the period's instructor payments.
    ///
    /// Approved, paid and cancelled rows are kept as they are. Pending rows
    /// are overwritten, or removed for instructors without hours.
    pub async fn calculate_instructor_payments_impl(
        &self,
        period: Period,
    ) -> Result<Vec<InstructorPayment>> {
        use instructor_payments::Column as P;

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start payroll calculation"))?;
        ensure_not_finalized(&txn, period).await?;

        let hours = Self::period_hours(&txn, period).await?;
        let active = instructors::Entity::find()
            .filter(instructors::Column::Status.eq(InstructorStatus::Active.to_string()))
            .order_by_asc(instructors::Column::Id)
            .all(&txn)
            .await
            .map_err(db_error("Failed to load instructors"))?;

        let existing: HashMap<i64, instructor_payments::Model> = instructor_payments::Entity::find()
            .filter(P::PeriodMonth.eq(period.first_day()))
            .all(&txn)
            .await
            .map_err(db_error("Failed to load instructor payments"))?
            .into_iter()
            .map(|p| (p.instructor_id, p))
            .collect();

        let now = now_ts();
        let mut kept = Vec::new();
        let mut paid_instructors = HashSet::new();

        for instructor in &active {
            let total_hours = hours.get(&instructor.id).copied().unwrap_or_default();
            let Some(pay) = compute_instructor_pay(
                total_hours,
                instructor.hourly_rate,
                instructor.tax_rate_percentage,
            ) else {
                continue;
            };
            paid_instructors.insert(instructor.id);

            let row = match existing.get(&instructor.id) {
                Some(row)
                    if row
                        .status
                        .parse::<InstructorPaymentStatus>()
                        .is_ok_and(|s| s.is_settled()) =>
                {
                    row.clone()
                }
                Some(row) => {
                    let mut model = row.clone().into_active_model();
                    model.total_hours = Set(pay.total_hours);
                    model.hourly_rate = Set(pay.hourly_rate);
                    model.gross_amount = Set(pay.gross_amount);
                    model.tax_rate = Set(pay.tax_rate);
                    model.tax_amount = Set(pay.tax_amount);
                    model.net_amount = Set(pay.net_amount);
                    model.status = Set(InstructorPaymentStatus::Pending.to_string());
                    model.updated_at = Set(now);
                    model
                        .update(&txn)
                        .await
                        .map_err(db_error("Failed to update instructor payment"))?
                }
                None => instructor_payments::ActiveModel {
                    instructor_id: Set(instructor.id),
                    period_month: Set(period.first_day()),
                    total_hours: Set(pay.total_hours),
                    hourly_rate: Set(pay.hourly_rate),
                    gross_amount: Set(pay.gross_amount),
                    tax_rate: Set(pay.tax_rate),
                    tax_amount: Set(pay.tax_amount),
                    net_amount: Set(pay.net_amount),
                    status: Set(InstructorPaymentStatus::Pending.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(db_error("Failed to create instructor payment"))?,
            };
            kept.push(row);
        }

        let stale: Vec<i64> = existing
            .values()
            .filter(|p| !paid_instructors.contains(&p.instructor_id))
            .filter(|p| p.status == InstructorPaymentStatus::Pending.to_string())
            .map(|p| p.id)
            .collect();
        if !stale.is_empty() {
            instructor_payments::Entity::delete_many()
                .filter(P::Id.is_in(stale))
                .exec(&txn)
                .await
                .map_err(db_error("Failed to remove stale instructor payments"))?;
        }

        let result = named_instructor_payments(&txn, kept).await?;
        txn.commit()
            .await
            .map_err(db_error("Failed to commit payroll calculation"))?;

        Ok(result)
    }

    /// Computes the period's profit and member distributions.
    ///
    /// Paid distributions are kept; pending ones that no longer apply are
    /// removed.
    pub async fn calculate_monthly_profit_impl(
        &self,
        period: Period,
        retained_earnings_percentage: Decimal,
    ) -> Result<(MonthlyFinancial, Vec<MemberDistribution>)> {
        use member_distributions::Column as D;
        use monthly_financials::Column as M;

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start profit calculation"))?;
        ensure_not_finalized(&txn, period).await?;

        let total_revenue = Self::revenue_in(&txn, period).await?;
        let instructor_total = sum_decimal(
            &txn,
            instructor_payments::Entity::find()
                .filter(instructor_payments::Column::PeriodMonth.eq(period.first_day()))
                .filter(instructor_payments::Column::Status.is_in([
                    InstructorPaymentStatus::Approved.to_string(),
                    InstructorPaymentStatus::Paid.to_string(),
                ])),
            instructor_payments::Column::NetAmount,
        )
        .await?;
        let operational = sum_decimal(
            &txn,
            expenses::Entity::find()
                .filter(expenses::Column::PeriodMonth.eq(period.first_day()))
                .filter(expenses::Column::Status.eq(ExpenseStatus::Paid.to_string())),
            expenses::Column::Amount,
        )
        .await?;

        let split = compute_profit_split(ProfitInputs {
            total_revenue,
            instructor_payments: instructor_total,
            operational_expenses: operational,
            other_expenses: Decimal::ZERO,
            retained_earnings_percentage,
        });

        let now = now_ts();
        let existing = monthly_financials::Entity::find()
            .filter(M::PeriodMonth.eq(period.first_day()))
            .one(&txn)
            .await
            .map_err(db_error("Failed to load monthly financials"))?;

        let is_new = existing.is_none();
        let mut model = match existing {
            Some(row) => row.into_active_model(),
            None => monthly_financials::ActiveModel {
                period_month: Set(period.first_day()),
                is_finalized: Set(false),
                created_at: Set(now),
                ..Default::default()
            },
        };
        model.total_revenue = Set(split.total_revenue);
        model.instructor_payments = Set(split.instructor_payments);
        model.operational_expenses = Set(split.operational_expenses);
        model.other_expenses = Set(split.other_expenses);
        model.total_expenses = Set(split.total_expenses);
        model.gross_profit = Set(split.gross_profit);
        model.retained_earnings_percentage = Set(split.retained_earnings_percentage);
        model.retained_earnings = Set(split.retained_earnings);
        model.distributable_profit = Set(split.distributable_profit);
        model.updated_at = Set(now);

        let monthly = if is_new {
            model.insert(&txn).await
        } else {
            model.update(&txn).await
        }
        .map_err(db_error("Failed to store monthly financials"))?;
        let monthly_id = monthly.id;

        let holders: Vec<ShareHolder> = members::Entity::find()
            .filter(members::Column::Status.eq(MemberStatus::Active.to_string()))
            .order_by_asc(members::Column::Id)
            .all(&txn)
            .await
            .map_err(db_error("Failed to load members"))?
            .into_iter()
            .map(|m| {
                let member = m.into_member();
                ShareHolder {
                    member_id: member.id,
                    share_percentage: member.share_percentage,
                    can_receive_profit: member.can_receive_profit(),
                }
            })
            .collect();
        let lines = distribute(split.distributable_profit, &holders);

        let existing: HashMap<i64, member_distributions::Model> =
            member_distributions::Entity::find()
                .filter(D::MonthlyFinancialId.eq(monthly_id))
                .all(&txn)
                .await
                .map_err(db_error("Failed to load distributions"))?
                .into_iter()
                .map(|d| (d.member_id, d))
                .collect();

        let paid = DistributionStatus::Paid.to_string();
        let mut current = HashSet::new();
        for line in &lines {
            current.insert(line.member_id);
            let status = if line.is_public_employee {
                DistributionStatus::Cancelled
            } else {
                DistributionStatus::Pending
            };

            match existing.get(&line.member_id) {
                Some(row) if row.status == paid => {}
                Some(row) => {
                    let mut model = row.clone().into_active_model();
                    model.share_percentage = Set(line.share_percentage);
                    model.amount = Set(line.amount);
                    model.is_public_employee = Set(line.is_public_employee);
                    if line.is_public_employee || row.status != DistributionStatus::Approved.to_string()
                    {
                        model.status = Set(status.to_string());
                    }
                    model.updated_at = Set(now);
                    model
                        .update(&txn)
                        .await
                        .map_err(db_error("Failed to update distribution"))?;
                }
                None => {
                    member_distributions::ActiveModel {
                        member_id: Set(line.member_id),
                        monthly_financial_id: Set(monthly_id),
                        share_percentage: Set(line.share_percentage),
                        amount: Set(line.amount),
                        status: Set(status.to_string()),
                        is_public_employee: Set(line.is_public_employee),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                    .map_err(db_error("Failed to create distribution"))?;
                }
            }
        }

        let stale: Vec<i64> = existing
            .values()
            .filter(|d| !current.contains(&d.member_id))
            .filter(|d| {
                d.status == DistributionStatus::Pending.to_string()
                    || d.status == DistributionStatus::Cancelled.to_string()
            })
            .map(|d| d.id)
            .collect();
        if !stale.is_empty() {
            member_distributions::Entity::delete_many()
                .filter(D::Id.is_in(stale))
                .exec(&txn)
                .await
                .map_err(db_error("Failed to remove stale distributions"))?;
        }

        let rows = member_distributions::Entity::find()
            .filter(D::MonthlyFinancialId.eq(monthly_id))
            .order_by_asc(D::MemberId)
            .all(&txn)
            .await
            .map_err(db_error("Failed to load distributions"))?;
        let distributions = named_distributions(&txn, rows).await?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit profit calculation"))?;

        Ok((monthly.into_monthly(), distributions))
    }

    // Instructor payments

    pub async fn list_instructor_payments_impl(
        &self,
        query: InstructorPaymentListQuery,
    ) -> Result<PaginatedResponse<InstructorPayment>> {
        use instructor_payments::Column as P;

        let (page, size) = page_params(query.page, query.size);

        let mut select = instructor_payments::Entity::find();
        if let Some(id) = query.instructor_id {
            select = select.filter(P::InstructorId.eq(id));
        }
        if let Some(status) = query.status {
            select = select.filter(P::Status.eq(status.to_string()));
        }
        if let Some(month) = query.period_month {
            select = select.filter(P::PeriodMonth.eq(Period::containing(month).first_day()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(P::PeriodMonth).order_by_asc(P::InstructorId),
                page,
                size,
                "Failed to list instructor payments",
            )
            .await?;

        let items = named_instructor_payments(&self.db, rows).await?;
        Ok(PaginatedResponse::new(items, page, size, total, pages))
    }

    /// Moves an instructor payment along its lifecycle; an illegal move is a `Conflict`.
    pub async fn transition_instructor_payment_impl(
        &self,
        id: i64,
        next: InstructorPaymentStatus,
        details: PaymentDetails,
    ) -> Result<Option<InstructorPayment>> {
        let Some(row) = instructor_payments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load instructor payment"))?
        else {
            return Ok(None);
        };

        let current = row
            .status
            .parse::<InstructorPaymentStatus>()
            .unwrap_or(InstructorPaymentStatus::Pending);
        if !current.can_transition_to(next) {
            return Err(CoopError::conflict(format!(
                "Instructor payment cannot move from {current} to {next}"
            )));
        }

        let mut model = row.into_active_model();
        model.status = Set(next.to_string());
        if next == InstructorPaymentStatus::Paid {
            model.payment_date = Set(Some(details.payment_date.unwrap_or_else(today)));
            model.payment_method = Set(details.payment_method.map(|m| m.to_string()));
            model.payment_reference = Set(details.payment_reference);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update instructor payment"))?;

        Ok(named_instructor_payments(&self.db, vec![updated]).await?.pop())
    }

    // Monthly financials

    pub async fn get_monthly_financial_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<MonthlyFinancial>> {
        let row = monthly_financials::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load monthly financials"))?;

        Ok(row.map(|r| r.into_monthly()))
    }

    pub async fn get_monthly_financial_by_period_impl(
        &self,
        period: Period,
    ) -> Result<Option<MonthlyFinancial>> {
        let row = monthly_financials::Entity::find()
            .filter(monthly_financials::Column::PeriodMonth.eq(period.first_day()))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load monthly financials"))?;

        Ok(row.map(|r| r.into_monthly()))
    }

    pub async fn list_monthly_financials_impl(
        &self,
        query: MonthlyFinancialListQuery,
    ) -> Result<PaginatedResponse<MonthlyFinancial>> {
        use monthly_financials::Column as M;

        let (page, size) = page_params(query.page, query.size);

        let mut select = monthly_financials::Entity::find();
        if let Some(finalized) = query.is_finalized {
            select = select.filter(M::IsFinalized.eq(finalized));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(M::PeriodMonth),
                page,
                size,
                "Failed to list monthly financials",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|r| r.into_monthly()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    /// Locks a period against recalculation; finalizing twice is a `Conflict`.
    pub async fn finalize_monthly_financial_impl(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> Result<Option<MonthlyFinancial>> {
        let Some(row) = monthly_financials::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load monthly financials"))?
        else {
            return Ok(None);
        };

        if row.is_finalized {
            return Err(CoopError::conflict(format!(
                "Period {} is already finalized",
                row.period_month.format("%Y-%m")
            )));
        }

        let now = now_ts();
        let mut model = row.into_active_model();
        model.is_finalized = Set(true);
        model.finalized_date = Set(Some(now));
        if let Some(notes) = notes {
            model.notes = Set(Some(notes));
        }
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to finalize period"))?;

        Ok(Some(updated.into_monthly()))
    }

    // Member distributions

    pub async fn list_distributions_impl(
        &self,
        query: DistributionListQuery,
    ) -> Result<PaginatedResponse<MemberDistribution>> {
        use member_distributions::Column as D;

        let (page, size) = page_params(query.page, query.size);

        let mut select = member_distributions::Entity::find();
        if let Some(id) = query.member_id {
            select = select.filter(D::MemberId.eq(id));
        }
        if let Some(id) = query.monthly_financial_id {
            select = select.filter(D::MonthlyFinancialId.eq(id));
        }
        if let Some(status) = query.status {
            select = select.filter(D::Status.eq(status.to_string()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select
                    .order_by_desc(D::MonthlyFinancialId)
                    .order_by_asc(D::MemberId),
                page,
                size,
                "Failed to list distributions",
            )
            .await?;

        let items = named_distributions(&self.db, rows).await?;
        Ok(PaginatedResponse::new(items, page, size, total, pages))
    }

    pub async fn list_monthly_distributions_impl(
        &self,
        monthly_financial_id: i64,
    ) -> Result<Vec<MemberDistribution>> {
        let rows = member_distributions::Entity::find()
            .filter(member_distributions::Column::MonthlyFinancialId.eq(monthly_financial_id))
            .order_by_asc(member_distributions::Column::MemberId)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list distributions"))?;

        named_distributions(&self.db, rows).await
    }

    pub async fn transition_distribution_impl(
        &self,
        id: i64,
        next: DistributionStatus,
        details: PaymentDetails,
    ) -> Result<Option<MemberDistribution>> {
        let Some(row) = member_distributions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load distribution"))?
        else {
            return Ok(None);
        };

        let current = row
            .status
            .parse::<DistributionStatus>()
            .unwrap_or(DistributionStatus::Pending);
        if !current.can_transition_to(next) {
            return Err(CoopError::conflict(format!(
                "Distribution cannot move from {current} to {next}"
            )));
        }
        if next != DistributionStatus::Cancelled && row.is_public_employee {
            return Err(CoopError::conflict(
                "Public employees cannot receive profit distributions",
            ));
        }

        let mut model = row.into_active_model();
        model.status = Set(next.to_string());
        if next == DistributionStatus::Paid {
            model.payment_date = Set(Some(details.payment_date.unwrap_or_else(today)));
            model.payment_reference = Set(details.payment_reference);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update distribution"))?;

        Ok(named_distributions(&self.db, vec![updated]).await?.pop())
    }

    // Expenses

    pub async fn create_expense_impl(&self, req: CreateExpenseRequest) -> Result<Expense> {
        let period = period_or_current(req.period_month.as_deref(), req.expense_date)?;
        let now = now_ts();

        let model = expenses::ActiveModel {
            category: Set(req.category.to_string()),
            description: Set(req.description),
            amount: Set(round_money(req.amount)),
            expense_date: Set(req.expense_date),
            period_month: Set(period.first_day()),
            status: Set(ExpenseStatus::Pending.to_string()),
            vendor: Set(req.vendor),
            receipt_number: Set(req.receipt_number),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to create expense"))?;

        Ok(model.into_expense())
    }

    pub async fn get_expense_by_id_impl(&self, id: i64) -> Result<Option<Expense>> {
        let row = expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load expense"))?;

        Ok(row.map(|r| r.into_expense()))
    }

    pub async fn list_expenses_impl(
        &self,
        query: ExpenseListQuery,
    ) -> Result<PaginatedResponse<Expense>> {
        use expenses::Column as E;

        let (page, size) = page_params(query.page, query.size);

        let mut select = expenses::Entity::find();
        if let Some(category) = query.category {
            select = select.filter(E::Category.eq(category.to_string()));
        }
        if let Some(status) = query.status {
            select = select.filter(E::Status.eq(status.to_string()));
        }
        if let Some(month) = query.period_month {
            select = select.filter(E::PeriodMonth.eq(Period::containing(month).first_day()));
        }
        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let escaped = escape_like_pattern(search);
            select = select.filter(
                sea_orm::Condition::any()
                    .add(E::Description.contains(&escaped))
                    .add(E::Vendor.contains(&escaped)),
            );
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(E::ExpenseDate).order_by_desc(E::Id),
                page,
                size,
                "Failed to list expenses",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|r| r.into_expense()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_expense_impl(
        &self,
        id: i64,
        update: UpdateExpenseRequest,
    ) -> Result<Option<Expense>> {
        let Some(row) = expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load expense"))?
        else {
            return Ok(None);
        };

        let period = match update.period_month.as_deref() {
            Some(raw) => Some(Period::parse(raw)?),
            None => None,
        };

        let mut model = row.into_active_model();
        if let Some(v) = update.category {
            model.category = Set(v.to_string());
        }
        if let Some(v) = update.description {
            model.description = Set(v);
        }
        if let Some(v) = update.amount {
            model.amount = Set(round_money(v));
        }
        if let Some(v) = update.expense_date {
            model.expense_date = Set(v);
        }
        if let Some(p) = period {
            model.period_month = Set(p.first_day());
        }
        if let Some(v) = update.vendor {
            model.vendor = Set(Some(v));
        }
        if let Some(v) = update.receipt_number {
            model.receipt_number = Set(Some(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update expense"))?;

        Ok(Some(updated.into_expense()))
    }

    pub async fn delete_expense_impl(&self, id: i64) -> Result<bool> {
        let result = expenses::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete expense"))?;

        Ok(result.rows_affected > 0)
    }

    /// `actor` is recorded as approver when moving to `approved`.
    pub async fn transition_expense_impl(
        &self,
        id: i64,
        next: ExpenseStatus,
        actor: Option<i64>,
    ) -> Result<Option<Expense>> {
        let Some(row) = expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load expense"))?
        else {
            return Ok(None);
        };

        let current = row
            .status
            .parse::<ExpenseStatus>()
            .unwrap_or(ExpenseStatus::Pending);
        if !current.can_transition_to(next) {
            return Err(CoopError::conflict(format!(
                "Expense cannot move from {current} to {next}"
            )));
        }

        let mut model = row.into_active_model();
        model.status = Set(next.to_string());
        if next == ExpenseStatus::Approved {
            model.approved_by = Set(actor);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update expense"))?;

        Ok(Some(updated.into_expense()))
    }

    // Budgets

    async fn budget_spent(&self, period_month: NaiveDate, category: &str) -> Result<Decimal> {
        let select = expenses::Entity::find()
            .filter(expenses::Column::PeriodMonth.eq(period_month))
            .filter(expenses::Column::Category.eq(category))
            .filter(expenses::Column::Status.eq(ExpenseStatus::Paid.to_string()));
        sum_decimal(&self.db, select, expenses::Column::Amount).await
    }

    async fn with_spent(&self, row: budget_allocations::Model) -> Result<BudgetAllocation> {
        let spent = self.budget_spent(row.period_month, &row.category).await?;
        Ok(row.into_budget(spent))
    }

    pub async fn create_budget_impl(&self, req: CreateBudgetRequest) -> Result<BudgetAllocation> {
        let period = period_or_current(req.period_month.as_deref(), today())?;
        let now = now_ts();

        let row = budget_allocations::ActiveModel {
            period_month: Set(period.first_day()),
            category: Set(req.category.to_string()),
            allocated_amount: Set(round_money(req.allocated_amount)),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to create budget"))?;

        self.with_spent(row).await
    }

    pub async fn get_budget_by_id_impl(&self, id: i64) -> Result<Option<BudgetAllocation>> {
        let Some(row) = budget_allocations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load budget"))?
        else {
            return Ok(None);
        };

        Ok(Some(self.with_spent(row).await?))
    }

    pub async fn list_budgets_impl(
        &self,
        query: BudgetListQuery,
    ) -> Result<PaginatedResponse<BudgetAllocation>> {
        use budget_allocations::Column as B;

        let (page, size) = page_params(query.page, query.size);

        let mut select = budget_allocations::Entity::find();
        if let Some(month) = query.period_month {
            select = select.filter(B::PeriodMonth.eq(Period::containing(month).first_day()));
        }
        if let Some(category) = query.category {
            select = select.filter(B::Category.eq(category.to_string()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(B::PeriodMonth).order_by_asc(B::Category),
                page,
                size,
                "Failed to list budgets",
            )
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(self.with_spent(row).await?);
        }
        Ok(PaginatedResponse::new(items, page, size, total, pages))
    }

    pub async fn update_budget_impl(
        &self,
        id: i64,
        update: UpdateBudgetRequest,
    ) -> Result<Option<BudgetAllocation>> {
        let Some(row) = budget_allocations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load budget"))?
        else {
            return Ok(None);
        };

        let mut model = row.into_active_model();
        if let Some(v) = update.allocated_amount {
            model.allocated_amount = Set(round_money(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update budget"))?;

        Ok(Some(self.with_spent(updated).await?))
    }

    pub async fn delete_budget_impl(&self, id: i64) -> Result<bool> {
        let result = budget_allocations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete budget"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::{
        entities::CourseType,
        requests::{AssignInstructorRequest, CreateCourseRequest, UpdateAssignmentRequest},
    };
    use crate::models::financials::entities::ExpenseCategory;
    use crate::models::instructors::requests::CreateInstructorRequest;
    use crate::models::members::{entities::EmploymentStatus, requests::CreateMemberRequest};
    use crate::models::payments::requests::CreatePaymentRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> Period {
        Period::containing(date(2025, 1, 1))
    }

    async fn seed_instructor(storage: &SeaOrmStorage) -> i64 {
        seed_assignment(storage).await.0
    }

    /// Instructor teaching 20 hours on a January-February course.
    async fn seed_assignment(storage: &SeaOrmStorage) -> (i64, i64) {
        let instructor = storage
            .create_instructor_impl(CreateInstructorRequest {
                full_name: "Karim".into(),
                email: "karim@example.com".into(),
                phone: "+212600000010".into(),
                address: None,
                specialization: "Maths".into(),
                qualifications: None,
                years_of_experience: None,
                employment_type: None,
                hire_date: None,
                status: None,
                hourly_rate: Decimal::from(100),
                tax_rate_percentage: Some(Decimal::from(10)),
                bank_name: None,
                account_number: None,
                rib: None,
                bio: None,
                notes: None,
            })
            .await
            .unwrap();

        let course = storage
            .create_course_impl(CreateCourseRequest {
                course_name: "Algebra".into(),
                course_type: CourseType::Academic,
                subject: "Maths".into(),
                description: None,
                fee_per_month: Decimal::from(300),
                max_students: None,
                duration_months: Some(2),
                schedule_days: vec![],
                schedule_time: None,
                hours_per_session: None,
                classroom: None,
                start_date: date(2025, 1, 1),
                end_date: date(2025, 2, 28),
                status: None,
            })
            .await
            .unwrap();

        storage
            .assign_instructor_impl(
                course.id,
                AssignInstructorRequest {
                    instructor_id: instructor.id,
                    is_primary: true,
                    hours_taught: Some(Decimal::from(20)),
                },
            )
            .await
            .unwrap();

        (instructor.id, course.id)
    }

    async fn seed_member(storage: &SeaOrmStorage, n: u8, share: i64, status: EmploymentStatus) {
        storage
            .create_member_impl(CreateMemberRequest {
                full_name: format!("Member {n}"),
                email: format!("member{n}@example.com"),
                phone: "+212600000020".into(),
                address: None,
                membership_number: Some(format!("MEM-{n}")),
                join_date: None,
                status: None,
                employment_status: status,
                employer_name: None,
                share_percentage: Decimal::from(share),
                bank_name: None,
                account_number: None,
                rib: None,
                notes: None,
            })
            .await
            .unwrap();
    }

    async fn seed_paid_expense(storage: &SeaOrmStorage, amount: i64) {
        let expense = storage
            .create_expense_impl(CreateExpenseRequest {
                category: ExpenseCategory::Maintenance,
                description: "Roof repair".into(),
                amount: Decimal::from(amount),
                expense_date: date(2025, 1, 20),
                period_month: None,
                vendor: None,
                receipt_number: None,
                notes: None,
            })
            .await
            .unwrap();
        storage
            .transition_expense_impl(expense.id, ExpenseStatus::Approved, Some(1))
            .await
            .unwrap();
        storage
            .transition_expense_impl(expense.id, ExpenseStatus::Paid, None)
            .await
            .unwrap();
    }

    async fn set_hours(storage: &SeaOrmStorage, course_id: i64, instructor_id: i64, hours: i64) {
        storage
            .update_assignment_impl(
                course_id,
                instructor_id,
                UpdateAssignmentRequest {
                    is_primary: None,
                    hours_taught: Some(Decimal::from(hours)),
                },
            )
            .await
            .unwrap()
            .unwrap();
    }

    async fn seed_revenue(storage: &SeaOrmStorage, amount: i64) {
        let student = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Salma".into(),
                date_of_birth: None,
                gender: None,
                email: None,
                phone: None,
                address: None,
                parent_name: "Parent".into(),
                parent_phone: "+212600000030".into(),
                parent_email: None,
                education_level: None,
                school_name: None,
                registration_date: None,
                status: None,
                medical_notes: None,
                notes: None,
            })
            .await
            .unwrap();

        storage
            .create_payment_impl(CreatePaymentRequest {
                student_id: student.id,
                enrollment_id: None,
                amount: Decimal::from(amount),
                amount_paid: Some(Decimal::from(amount)),
                payment_method: None,
                due_date: date(2025, 1, 10),
                payment_date: Some(date(2025, 1, 15)),
                status: Some(PaymentStatus::Paid),
                transaction_reference: None,
                notes: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_instructor_pay_from_assigned_hours() {
        let storage = memory_storage().await;
        let instructor_id = seed_instructor(&storage).await;

        let payments = storage
            .calculate_instructor_payments_impl(january())
            .await
            .unwrap();
        assert_eq!(payments.len(), 1);
        let pay = &payments[0];
        assert_eq!(pay.instructor_id, instructor_id);
        assert_eq!(pay.gross_amount, Decimal::from(2000));
        assert_eq!(pay.tax_amount, Decimal::from(200));
        assert_eq!(pay.net_amount, Decimal::from(1800));
        assert_eq!(pay.instructor_name.as_deref(), Some("Karim"));

        // approved rows survive a rerun untouched
        storage
            .transition_instructor_payment_impl(
                pay.id,
                InstructorPaymentStatus::Approved,
                PaymentDetails::default(),
            )
            .await
            .unwrap();
        let rerun = storage
            .calculate_instructor_payments_impl(january())
            .await
            .unwrap();
        assert_eq!(rerun.len(), 1);
        assert_eq!(rerun[0].id, pay.id);
        assert_eq!(rerun[0].status, InstructorPaymentStatus::Approved);

        // nothing taught in March
        let march = Period::containing(date(2025, 3, 1));
        assert!(
            storage
                .calculate_instructor_payments_impl(march)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_profit_run_is_idempotent() {
        let storage = memory_storage().await;
        let instructor_id = seed_instructor(&storage).await;
        seed_revenue(&storage, 5000).await;
        seed_member(&storage, 1, 60, EmploymentStatus::Private).await;
        seed_member(&storage, 2, 40, EmploymentStatus::Public).await;

        let payments = storage
            .calculate_instructor_payments_impl(january())
            .await
            .unwrap();
        assert_eq!(payments[0].instructor_id, instructor_id);
        storage
            .transition_instructor_payment_impl(
                payments[0].id,
                InstructorPaymentStatus::Approved,
                PaymentDetails::default(),
            )
            .await
            .unwrap();

        let expense = storage
            .create_expense_impl(CreateExpenseRequest {
                category: ExpenseCategory::Rent,
                description: "January rent".into(),
                amount: Decimal::from(500),
                expense_date: date(2025, 1, 5),
                period_month: None,
                vendor: None,
                receipt_number: None,
                notes: None,
            })
            .await
            .unwrap();
        storage
            .transition_expense_impl(expense.id, ExpenseStatus::Approved, Some(1))
            .await
            .unwrap();
        storage
            .transition_expense_impl(expense.id, ExpenseStatus::Paid, None)
            .await
            .unwrap();

        let (monthly, distributions) = storage
            .calculate_monthly_profit_impl(january(), Decimal::from(20))
            .await
            .unwrap();
        assert_eq!(monthly.total_revenue, Decimal::from(5000));
        assert_eq!(monthly.total_expenses, Decimal::from(2300));
        assert_eq!(monthly.gross_profit, Decimal::from(2700));
        assert_eq!(monthly.retained_earnings, Decimal::from(540));
        assert_eq!(monthly.distributable_profit, Decimal::from(2160));
        assert_eq!(distributions.len(), 2);
        assert_eq!(distributions[0].amount, Decimal::from(1296));
        assert_eq!(distributions[0].status, DistributionStatus::Pending);
        assert_eq!(distributions[1].status, DistributionStatus::Cancelled);
        assert!(distributions[1].is_public_employee);

        let (again, rerun) = storage
            .calculate_monthly_profit_impl(january(), Decimal::from(20))
            .await
            .unwrap();
        assert_eq!(again.id, monthly.id);
        assert_eq!(rerun.len(), 2);
        assert_eq!(rerun[0].id, distributions[0].id);
    }

    #[tokio::test]
    async fn test_rerun_after_loss_keeps_paid_distributions() {
        let storage = memory_storage().await;
        seed_revenue(&storage, 5000).await;
        seed_member(&storage, 1, 60, EmploymentStatus::Private).await;
        seed_member(&storage, 2, 40, EmploymentStatus::SelfEmployed).await;

        let (_, distributions) = storage
            .calculate_monthly_profit_impl(january(), Decimal::from(20))
            .await
            .unwrap();
        assert_eq!(distributions.len(), 2);
        assert_eq!(distributions[0].amount, Decimal::from(2400));
        assert_eq!(distributions[1].status, DistributionStatus::Pending);

        let paid_id = distributions[0].id;
        for next in [DistributionStatus::Approved, DistributionStatus::Paid] {
            storage
                .transition_distribution_impl(paid_id, next, PaymentDetails::default())
                .await
                .unwrap()
                .unwrap();
        }

        seed_paid_expense(&storage, 10_000).await;
        let (monthly, rerun) = storage
            .calculate_monthly_profit_impl(january(), Decimal::from(20))
            .await
            .unwrap();
        assert_eq!(monthly.gross_profit, Decimal::from(-5000));
        assert_eq!(monthly.retained_earnings, Decimal::ZERO);
        assert_eq!(monthly.distributable_profit, Decimal::ZERO);

        // the pending share is gone, the paid one is untouched
        assert_eq!(rerun.len(), 1);
        assert_eq!(rerun[0].id, paid_id);
        assert_eq!(rerun[0].status, DistributionStatus::Paid);
        assert_eq!(rerun[0].amount, Decimal::from(2400));
    }

    #[tokio::test]
    async fn test_rerun_after_hours_change() {
        let storage = memory_storage().await;
        let (instructor_id, course_id) = seed_assignment(&storage).await;

        let first = storage
            .calculate_instructor_payments_impl(january())
            .await
            .unwrap();
        assert_eq!(first[0].gross_amount, Decimal::from(2000));

        // pending rows follow the new hours
        set_hours(&storage, course_id, instructor_id, 30).await;
        let rerun = storage
            .calculate_instructor_payments_impl(january())
            .await
            .unwrap();
        assert_eq!(rerun[0].id, first[0].id);
        assert_eq!(rerun[0].status, InstructorPaymentStatus::Pending);
        assert_eq!(rerun[0].gross_amount, Decimal::from(3000));
        assert_eq!(rerun[0].net_amount, Decimal::from(2700));

        // approved rows do not
        storage
            .transition_instructor_payment_impl(
                first[0].id,
                InstructorPaymentStatus::Approved,
                PaymentDetails::default(),
            )
            .await
            .unwrap();
        set_hours(&storage, course_id, instructor_id, 40).await;
        let rerun = storage
            .calculate_instructor_payments_impl(january())
            .await
            .unwrap();
        assert_eq!(rerun[0].status, InstructorPaymentStatus::Approved);
        assert_eq!(rerun[0].gross_amount, Decimal::from(3000));

        // neither do cancelled ones
        storage
            .transition_instructor_payment_impl(
                first[0].id,
                InstructorPaymentStatus::Cancelled,
                PaymentDetails::default(),
            )
            .await
            .unwrap();
        let rerun = storage
            .calculate_instructor_payments_impl(january())
            .await
            .unwrap();
        assert_eq!(rerun.len(), 1);
        assert_eq!(rerun[0].status, InstructorPaymentStatus::Cancelled);
        assert_eq!(rerun[0].total_hours, Decimal::from(30));
    }

    #[tokio::test]
    async fn test_finalized_period_is_locked() {
        let storage = memory_storage().await;
        let (monthly, _) = storage
            .calculate_monthly_profit_impl(january(), Decimal::from(20))
            .await
            .unwrap();

        storage
            .finalize_monthly_financial_impl(monthly.id, None)
            .await
            .unwrap()
            .unwrap();

        let again = storage.finalize_monthly_financial_impl(monthly.id, None).await;
        assert!(matches!(again, Err(CoopError::Conflict(_))));

        let recalc = storage
            .calculate_monthly_profit_impl(january(), Decimal::from(20))
            .await;
        assert!(matches!(recalc, Err(CoopError::PeriodFinalized(_))));

        let payroll = storage.calculate_instructor_payments_impl(january()).await;
        assert!(matches!(payroll, Err(CoopError::PeriodFinalized(_))));
    }

    #[tokio::test]
    async fn test_expense_transitions_and_budget_spent() {
        let storage = memory_storage().await;
        let budget = storage
            .create_budget_impl(CreateBudgetRequest {
                period_month: Some("2025-01".into()),
                category: ExpenseCategory::Supplies,
                allocated_amount: Decimal::from(400),
                notes: None,
            })
            .await
            .unwrap();
        assert_eq!(budget.spent, Decimal::ZERO);

        let expense = storage
            .create_expense_impl(CreateExpenseRequest {
                category: ExpenseCategory::Supplies,
                description: "Markers".into(),
                amount: Decimal::from(100),
                expense_date: date(2025, 1, 8),
                period_month: None,
                vendor: Some("Papeterie".into()),
                receipt_number: None,
                notes: None,
            })
            .await
            .unwrap();

        let skip = storage
            .transition_expense_impl(expense.id, ExpenseStatus::Paid, None)
            .await;
        assert!(matches!(skip, Err(CoopError::Conflict(_))));

        storage
            .transition_expense_impl(expense.id, ExpenseStatus::Approved, Some(7))
            .await
            .unwrap();
        let paid = storage
            .transition_expense_impl(expense.id, ExpenseStatus::Paid, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(paid.approved_by, Some(7));

        let budget = storage.get_budget_by_id_impl(budget.id).await.unwrap().unwrap();
        assert_eq!(budget.spent, Decimal::from(100));
        assert_eq!(budget.remaining, Decimal::from(300));
    }
}
