use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::period::role_cadence;
use crate::core::upload::UploadLogic;
use crate::errors::{AppError, AppResult};
use crate::models::metric::FieldType;
use crate::models::role::Role;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

/// Print the form keys a role fills, one row per input.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Fields { role } = cmd else {
        return Ok(());
    };

    let role = Role::from_code(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
    if !role.is_uploader() {
        info(format!("Role '{}' has no upload obligation.", role));
        return Ok(());
    }

    header(format!("{} ({} submissions)", role, role_cadence(role)));

    let mut table = Table::with_headers(&["Metric", "Form key", "Label", "Type"]);
    for (kind, sub_key) in UploadLogic::form_slots(role, &cfg.banks) {
        for field in kind.fields() {
            let label = if sub_key.is_empty() {
                field.label.to_string()
            } else {
                format!("{} {}", sub_key, field.label)
            };
            let ty = match field.ty {
                FieldType::Float => "decimal",
                FieldType::Int => "integer",
            };
            table.add_row(vec![
                kind.display_name().to_string(),
                field.form_key_for(&sub_key),
                label,
                ty.to_string(),
            ]);
        }
    }
    print!("{}", table.render());

    Ok(())
}
