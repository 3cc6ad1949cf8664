use crate::core::notify::{Notification, Notifier};
use crate::core::store::UserDirectory;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub const REMINDER_SUBJECT: &str = "Daily KPI Upload";
pub const REMINDER_BODY: &str = "Good morning. Please remember to upload your KPI data today.";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReminderRun {
    pub sent: usize,
    pub failed: usize,
    /// Uploaders without a contact address.
    pub skipped: usize,
}

/// Morning reminder to every uploader, regardless of what was submitted.
pub fn send_reminders<D, N>(directory: &D, notifier: &N, cc: &[String]) -> AppResult<ReminderRun>
where
    D: UserDirectory,
    N: Notifier,
{
    let mut run = ReminderRun::default();

    for user in directory.uploaders()? {
        let Some(to) = user.contact() else {
            run.skipped += 1;
            continue;
        };

        let msg = Notification {
            to: to.to_string(),
            cc: cc.to_vec(),
            subject: REMINDER_SUBJECT.to_string(),
            body: REMINDER_BODY.to_string(),
        };

        match notifier.send(&msg) {
            Ok(()) => run.sent += 1,
            Err(e) => {
                warning(format!("Failed to remind {}: {}", user.username, e));
                run.failed += 1;
            }
        }
    }

    Ok(run)
}
