use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{Dashboard, build_dashboard};
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::amount;
use crate::utils::colors::{GREY, RESET, colorize_amount};
use crate::utils::date::date_or_today;
use crate::utils::formatting::bold;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Dashboard { date, json } = cmd else {
        return Ok(());
    };

    let day = date_or_today(date.as_deref())?;

    let pool = DbPool::new(&cfg.database)?;
    let store = SqliteStore::new(&pool.conn);
    let dash = build_dashboard(&store, day, &cfg.banks)?;

    if *json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
    } else {
        print_dashboard(&dash);
    }
    Ok(())
}

fn cell(v: f64) -> String {
    colorize_amount(v, &amount(v))
}

fn print_dashboard(dash: &Dashboard) {
    header(format!("KPI dashboard, {}", dash.date.format("%A, %d %B %Y")));

    println!("{}", bold("Bank balances"));
    let mut balances = Table::with_headers(&["Bank", "USD", "ZiG"]);
    for b in &dash.balances {
        balances.add_row(vec![b.name.clone(), cell(b.usd), cell(b.zig)]);
    }
    println!("{}", balances.render());

    println!("{}", bold("Headline"));
    let h = &dash.headline;
    let mut headline = Table::with_headers(&["Figure", "Total"]);
    for (label, v) in [
        ("Interest (paid + due)", h.interest_total),
        ("Payables", h.payables_total),
        ("Receivables", h.receivables_total),
        ("Billets (unit 1 + unit 2)", h.billets_total),
        ("Sales, product lines", h.sales_products_total),
    ] {
        headline.add_row(vec![label.to_string(), cell(v)]);
    }
    println!("{}", headline.render());

    println!("{}", bold("Latest records"));
    let mut latest = Table::with_headers(&["Metric", "Date", "Values"]);
    for snap in &dash.latest {
        let (date, values) = match snap.date {
            Some(d) => (
                d.to_string(),
                snap.values
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            None => (format!("{GREY}--{RESET}"), format!("{GREY}no data{RESET}")),
        };
        latest.add_row(vec![snap.name.to_string(), date, values]);
    }
    print!("{}", latest.render());
}
