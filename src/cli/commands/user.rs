use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::users::seed_roster;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let store = SqliteStore::new(&pool.conn);

    match action {
        UserAction::Add {
            username,
            role,
            email,
        } => {
            let role = Role::from_code(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
            let email = email.as_deref().map(str::trim).filter(|e| !e.is_empty());

            let user = store.insert_user(username.trim(), email, role)?;
            ttlog(
                &pool.conn,
                "user_add",
                &user.username,
                &format!("Added {} as {}", user.username, role.to_db_str()),
            )?;
            success(format!("User '{}' added with role {}", user.username, role));
        }

        UserAction::List => {
            let users = store.list_users()?;
            if users.is_empty() {
                info("No users registered. Run `kpidesk user seed` for the default roster.");
                return Ok(());
            }

            let mut table = Table::with_headers(&["ID", "Username", "Role", "Email"]);
            for u in users {
                let email = match u.contact() {
                    Some(e) => e.to_string(),
                    None => format!("{GREY}--{RESET}"),
                };
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.role.to_db_str().to_string(),
                    email,
                ]);
            }
            print!("{}", table.render());
        }

        UserAction::Del { username } => {
            if store.delete_user(username)? {
                ttlog(&pool.conn, "user_del", username, &format!("Deleted {username}"))?;
                success(format!("User '{username}' deleted."));
            } else {
                return Err(AppError::UnknownUser(username.clone()));
            }
        }

        UserAction::Seed => {
            let created = seed_roster(&store)?;
            if created.is_empty() {
                warning("Default roster already present, nothing to add.");
            } else {
                for name in &created {
                    ttlog(&pool.conn, "user_add", name, "Seeded from default roster")?;
                }
                success(format!("Created {} users: {}", created.len(), created.join(", ")));
            }
        }
    }

    Ok(())
}
