//! Missed-submission detection and overdue alerts.

use crate::config::Config;
use crate::core::checklist::{ChecklistEntry, checklist_from_config};
use crate::core::notify::{Notification, Notifier};
use crate::core::period::target_for;
use crate::core::store::{RecordStore, UserDirectory};
use crate::errors::AppResult;
use crate::models::cadence::{Cadence, Target};
use crate::models::user::User;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use serde::Serialize;

/// An expected record that is absent for today's period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub entry: ChecklistEntry,
    pub target: Target,
    /// Human phrasing of the period, e.g. "for Monday, 04 March 2024".
    pub period: String,
}

impl Violation {
    fn new(entry: ChecklistEntry, target: Target) -> Self {
        let period = match (target, entry.cadence) {
            (Target::Since(_), Cadence::Range(days)) => {
                format!("in the last {} days", days.max(1))
            }
            (Target::Since(d), _) => format!("since {}", d.format("%d %B %Y")),
            (Target::Exact(d), _) => format!("for {}", d.format("%A, %d %B %Y")),
        };
        Self {
            entry,
            target,
            period,
        }
    }

    /// `exact` for single-date targets, `range` for rolling windows.
    pub fn check_type(&self) -> &'static str {
        if self.target.is_exact() { "exact" } else { "range" }
    }
}

/// Who gets alerted and what is checked.
#[derive(Debug, Clone)]
pub struct CheckerSettings {
    pub supervisor: String,
    pub cc: Vec<String>,
    pub checklist: Vec<ChecklistEntry>,
}

impl CheckerSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            supervisor: cfg.supervisor.clone(),
            cc: cfg.cc_list(),
            checklist: checklist_from_config(cfg),
        }
    }
}

/// Outcome of one notification attempt.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub to: String,
    pub subject: String,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ComplianceRun {
    pub violations: Vec<Violation>,
    pub deliveries: Vec<Delivery>,
}

impl ComplianceRun {
    pub fn delivered(&self) -> usize {
        self.deliveries.iter().filter(|d| d.error.is_none()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| d.error.is_some())
    }
}

pub struct ComplianceChecker<'a, S, D, N> {
    store: &'a S,
    directory: &'a D,
    notifier: &'a N,
    settings: CheckerSettings,
}

impl<'a, S, D, N> ComplianceChecker<'a, S, D, N>
where
    S: RecordStore,
    D: UserDirectory,
    N: Notifier,
{
    pub fn new(store: &'a S, directory: &'a D, notifier: &'a N, settings: CheckerSettings) -> Self {
        Self {
            store,
            directory,
            notifier,
            settings,
        }
    }

    /// Probe every checklist entry; entries without an assigned uploader are skipped.
    fn probe(&self, today: NaiveDate) -> AppResult<Vec<(Violation, User)>> {
        let mut out = Vec::new();

        for entry in &self.settings.checklist {
            let target = target_for(entry.cadence, today);

            let present = match target {
                Target::Exact(d) => self.store.find(entry.kind, d)?.is_some(),
                Target::Since(d) => self.store.find_since(entry.kind, d)?.is_some(),
            };
            if present {
                continue;
            }

            let Some(uploader) = self.directory.find_by_role(entry.role)? else {
                continue;
            };

            out.push((Violation::new(*entry, target), uploader));
        }

        Ok(out)
    }

    /// Violations for `today` without sending anything.
    pub fn find_violations(&self, today: NaiveDate) -> AppResult<Vec<Violation>> {
        Ok(self.probe(today)?.into_iter().map(|(v, _)| v).collect())
    }

    /// Detect violations for `today` and alert the uploader and the supervisor.
    ///
    /// Delivery failures are recorded in the returned run and never abort the loop;
    /// store failures abort the whole run.
    pub fn check_compliance(&self, today: NaiveDate) -> AppResult<ComplianceRun> {
        let found = self.probe(today)?;
        let supervisor = if found.is_empty() {
            None
        } else {
            self.directory.find_by_username(&self.settings.supervisor)?
        };

        let mut run = ComplianceRun::default();

        for (violation, uploader) in found {
            if let Some(to) = uploader.contact() {
                let msg = self.uploader_message(&violation, &uploader, to);
                run.deliveries.push(self.deliver(msg));
            }

            if let Some(to) = supervisor.as_ref().and_then(User::contact) {
                let msg = self.supervisor_message(&violation, &uploader, to);
                run.deliveries.push(self.deliver(msg));
            }

            run.violations.push(violation);
        }

        Ok(run)
    }

    fn deliver(&self, msg: Notification) -> Delivery {
        let error = match self.notifier.send(&msg) {
            Ok(()) => None,
            Err(e) => {
                warning(format!("Failed to notify {}: {}", msg.to, e));
                Some(e.to_string())
            }
        };
        Delivery {
            to: msg.to,
            subject: msg.subject,
            error,
        }
    }

    fn uploader_message(&self, v: &Violation, uploader: &User, to: &str) -> Notification {
        Notification {
            to: to.to_string(),
            cc: self.settings.cc.clone(),
            subject: format!("URGENT: {} Overdue", v.entry.name),
            body: format!(
                "Hello {},\n\nYou have not uploaded the {} {}. Please upload it immediately.",
                uploader.username, v.entry.name, v.period
            ),
        }
    }

    fn supervisor_message(&self, v: &Violation, uploader: &User, to: &str) -> Notification {
        let expected = match v.target {
            Target::Exact(d) => format!("Expected Date: {}", d.format("%Y-%m-%d")),
            Target::Since(d) => format!(
                "Expected: at least one record {} (since {})",
                v.period,
                d.format("%Y-%m-%d")
            ),
        };

        Notification {
            to: to.to_string(),
            cc: self.settings.cc.clone(),
            subject: format!("ALERT: {} Missing", v.entry.name),
            body: format!(
                "ALERT: {} Missing\n\nUser: {}\n{}",
                v.entry.name, uploader.username, expected
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checklist::strict_checklist;
    use crate::models::metric::MetricKind;

    fn scrap_entry(cadence: Cadence) -> ChecklistEntry {
        let mut entry = strict_checklist()
            .into_iter()
            .find(|e| e.kind == MetricKind::ScrapData)
            .unwrap();
        entry.cadence = cadence;
        entry
    }

    #[test]
    fn window_phrasing_never_says_zero_days() {
        let since = Target::Since(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(
            Violation::new(scrap_entry(Cadence::Range(0)), since).period,
            "in the last 1 days"
        );
        assert_eq!(
            Violation::new(scrap_entry(Cadence::Range(3)), since).period,
            "in the last 3 days"
        );
    }
}
