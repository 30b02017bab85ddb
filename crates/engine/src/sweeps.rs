//! Scheduled sweeps: auto-approval of stale applications, fiscal-year
//! carry-over and expiry of carried-over days.
//!
//! Every sweep is idempotent. A failure on one application or balance is
//! logged and skipped so the rest of the run proceeds.

use chrono::NaiveDate;
use leavebook_core::accrual::{CarryOverOutcome, CarryOverService};
use leavebook_core::calendar::{fiscal_year_bounds, fiscal_year_of};
use leavebook_core::ledger::{BalanceKey, ExpiryOutcome};
use leavebook_core::notification::{Notification, NotificationTemplate};
use leavebook_core::workflow::{ApprovalAction, WorkflowError, WorkflowService};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::LeaveEngine;
use crate::error::EngineResult;

/// Counts of what one sweep run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Applications advanced one stage.
    pub auto_approved: usize,
    /// Balances that received a carry-over.
    pub carried_over: usize,
    /// Balances whose carried-over days were expired.
    pub expired: usize,
    /// Expiry warnings sent.
    pub warnings_sent: usize,
}

enum ExpiryEvent {
    Expired(Decimal, NaiveDate),
    Warning(Decimal, NaiveDate),
}

impl LeaveEngine {
    /// Runs every sweep once.
    ///
    /// # Errors
    ///
    /// Only fails when the current policy or fiscal year cannot be resolved.
    pub fn run_sweeps(&self) -> EngineResult<SweepReport> {
        let auto_approved = self.auto_approve_stale()?;
        let carried_over = self.roll_over_balances()?;
        let (expired, warnings_sent) = self.expire_carry_over()?;
        let report = SweepReport {
            auto_approved,
            carried_over,
            expired,
            warnings_sent,
        };
        tracing::info!(
            auto_approved = report.auto_approved,
            carried_over = report.carried_over,
            expired = report.expired,
            warnings_sent = report.warnings_sent,
            "sweep completed"
        );
        Ok(report)
    }

    /// Advances each pending application that has waited at least
    /// `auto_approve_after_days` by one stage. Returns how many moved.
    ///
    /// # Errors
    ///
    /// Fails only when the current policy cannot be read.
    pub fn auto_approve_stale(&self) -> EngineResult<usize> {
        let snapshot = self.policy.current()?;
        let Some(after_days) = snapshot
            .settings
            .auto_approve_after_days
            .filter(|days| *days > 0)
        else {
            tracing::debug!("auto-approval disabled");
            return Ok(0);
        };

        let now = self.clock.now();
        let due: Vec<_> = self
            .pending_application_ids()
            .into_iter()
            .filter(|id| {
                self.applications.get(id).is_some_and(|app| {
                    WorkflowService::is_auto_approve_due(
                        app.status,
                        app.status_changed_at,
                        now,
                        after_days,
                    )
                })
            })
            .collect();
        tracing::debug!(candidates = due.len(), after_days, "auto-approval sweep");

        let mut advanced = 0;
        for id in due {
            let result = self.transition_application(id, None, None, |app| {
                if WorkflowService::is_auto_approve_due(
                    app.status,
                    app.status_changed_at,
                    now,
                    after_days,
                ) {
                    WorkflowService::auto_approve(app.status, app.chain)
                } else {
                    Err(WorkflowError::InvalidTransition {
                        from: app.status,
                        action: ApprovalAction::AutoApproved,
                    })
                }
            });
            match result {
                Ok((application, _)) => {
                    advanced += 1;
                    self.notify(Notification::for_application(
                        NotificationTemplate::AutoApproved,
                        &application,
                    ));
                }
                Err(err) => {
                    tracing::warn!(application_id = %id, error = %err, "auto-approval skipped");
                }
            }
        }
        Ok(advanced)
    }

    /// Carries unused days of last fiscal year into the current one for
    /// every carry-over type. Returns how many balances received days.
    ///
    /// # Errors
    ///
    /// Fails only when the current policy or fiscal year cannot be resolved.
    pub fn roll_over_balances(&self) -> EngineResult<usize> {
        let snapshot = self.policy.current()?;
        let start_month = snapshot.settings.fiscal_year_start_month;
        let current_year = fiscal_year_of(self.clock.today(), start_month)?;
        let (rollover_date, _) = fiscal_year_bounds(current_year, start_month)?;

        let sources: Vec<BalanceKey> = self
            .ledger
            .keys()
            .into_iter()
            .filter(|key| key.fiscal_year == current_year - 1)
            .collect();
        tracing::debug!(candidates = sources.len(), current_year, "carry-over sweep");

        let mut applied = 0;
        for key in sources {
            let Ok(leave_type) = self.leave_types.get(key.leave_type_id) else {
                continue;
            };
            if !leave_type.is_carry_over_allowed {
                continue;
            }

            // Settle both years' accrual before moving days across.
            let previous = match self.directory.profile(key.employee_id) {
                Some(profile) => {
                    let refreshed = self
                        .refresh_with(&profile, &leave_type, key.fiscal_year, &snapshot)
                        .and_then(|previous| {
                            self.refresh_with(&profile, &leave_type, current_year, &snapshot)
                                .map(|_| previous)
                        });
                    match refreshed {
                        Ok(previous) => previous,
                        Err(err) => {
                            tracing::warn!(%key, error = %err, "carry-over skipped");
                            continue;
                        }
                    }
                }
                None => match self.ledger.balance(key) {
                    Ok(previous) => previous,
                    Err(_) => continue,
                },
            };

            let outcome = self.ledger.update(key.next_year(), |target| {
                CarryOverService::rollover(&leave_type, &previous, target, rollover_date)
            });
            if let CarryOverOutcome::Applied { days, expiry_date } = outcome {
                applied += 1;
                tracing::info!(
                    from = %key,
                    %days,
                    expiry_date = ?expiry_date,
                    "unused days carried over"
                );
            }
            // Days released into the closed year while the rollover ran.
            self.ledger.sync_carry_over(key);
        }
        Ok(applied)
    }

    /// Expires carried-over days past their expiry date and warns about days
    /// about to expire. Returns `(expired, warnings_sent)`.
    ///
    /// # Errors
    ///
    /// Fails only when the current policy cannot be read.
    pub fn expire_carry_over(&self) -> EngineResult<(usize, usize)> {
        let snapshot = self.policy.current()?;
        let notice_days = snapshot.settings.expiry_notification_days;
        let today = self.clock.today();

        let mut expired = 0;
        let mut warned = 0;
        for key in self.ledger.keys() {
            let event = self.ledger.update(key, |balance| {
                let expiry_date = balance.expiry_date?;
                match balance.expire_carry_over(today) {
                    ExpiryOutcome::Expired(days) => Some(ExpiryEvent::Expired(days, expiry_date)),
                    ExpiryOutcome::NotDue if balance.needs_expiry_warning(today, notice_days) => {
                        balance.mark_expiry_warning_sent();
                        Some(ExpiryEvent::Warning(
                            balance.unconsumed_carry_over(),
                            expiry_date,
                        ))
                    }
                    _ => None,
                }
            });

            match event {
                Some(ExpiryEvent::Expired(days, expiry_date)) => {
                    expired += 1;
                    tracing::info!(%key, %days, %expiry_date, "carried-over days expired");
                    self.notify(Notification::for_expiry(
                        NotificationTemplate::BalanceExpired,
                        &key,
                        days,
                        expiry_date,
                    ));
                }
                Some(ExpiryEvent::Warning(days, expiry_date)) => {
                    warned += 1;
                    tracing::info!(%key, %days, %expiry_date, "expiry warning sent");
                    self.notify(Notification::for_expiry(
                        NotificationTemplate::BalanceExpiring,
                        &key,
                        days,
                        expiry_date,
                    ));
                }
                None => {}
            }
        }
        Ok((expired, warned))
    }
}
