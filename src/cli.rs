// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .help("Record id or a unique prefix of it")
}

fn amount_arg() -> Arg {
    Arg::new("amount").required(true)
}

fn opt(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

fn req(name: &'static str) -> Arg {
    Arg::new(name).long(name).required(true)
}

fn month_opt() -> Arg {
    opt("month").help("YYYY-MM, defaults to the selected month")
}

fn switch(name: &'static str) -> Arg {
    Arg::new(name)
        .value_parser(BoolishValueParser::new())
        .help("on|off")
}

fn out_arg() -> Arg {
    req("out").help("Destination file")
}

fn days_arg() -> Arg {
    Arg::new("days")
        .long("days")
        .value_parser(value_parser!(i64).range(0..))
        .default_value("7")
        .help("Look-ahead for EMI and premium reminders")
}

fn currency_cmd() -> Command {
    Command::new("currency")
        .about("Choose or show the display currency")
        .subcommand_required(true)
        .subcommand(
            Command::new("set").arg(
                Arg::new("code")
                    .required(true)
                    .help("USD|INR|EUR|GBP|JPY|AED"),
            ),
        )
        .subcommand(Command::new("show"))
}

fn month_cmd() -> Command {
    Command::new("month")
        .about("Selected month used by reports")
        .subcommand_required(true)
        .subcommand(Command::new("set").arg(Arg::new("month").required(true)))
        .subcommand(Command::new("show"))
}

fn window_cmd() -> Command {
    Command::new("window")
        .about("Dashboard window in months")
        .subcommand_required(true)
        .subcommand(
            Command::new("set").arg(
                Arg::new("months")
                    .required(true)
                    .value_parser(["1", "3", "6", "12"]),
            ),
        )
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Expense ledger")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("name"))
                .arg(req("category"))
                .arg(req("amount"))
                .arg(req("date").help("YYYY-MM-DD"))
                .arg(opt("icon"))
                .arg(opt("note"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list").arg(month_opt()).arg(json_flag()))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("name"))
                .arg(opt("category"))
                .arg(opt("amount"))
                .arg(opt("date"))
                .arg(opt("icon"))
                .arg(opt("note"))
                .arg(opt("recurring").value_parser(BoolishValueParser::new())),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Saving goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("name"))
                .arg(req("category"))
                .arg(req("target"))
                .arg(opt("saved").default_value("0"))
                .arg(req("date").help("Deadline, YYYY-MM-DD"))
                .arg(opt("icon"))
                .arg(
                    Arg::new("emergency")
                        .long("emergency")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list").arg(json_flag()))
        .subcommand(Command::new("deposit").arg(id_arg()).arg(amount_arg()))
        .subcommand(Command::new("withdraw").arg(id_arg()).arg(amount_arg()))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn invest_cmd() -> Command {
    Command::new("invest")
        .about("Investments")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("title"))
                .arg(req("category"))
                .arg(req("amount"))
                .arg(req("date"))
                .arg(opt("note")),
        )
        .subcommand(Command::new("list").arg(json_flag()))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn lend_cmd() -> Command {
    Command::new("lend")
        .about("Money lent to others")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("person"))
                .arg(opt("reason").default_value(""))
                .arg(req("amount"))
                .arg(req("date"))
                .arg(opt("due").help("Due month, YYYY-MM")),
        )
        .subcommand(Command::new("list").arg(json_flag()))
        .subcommand(Command::new("repay").arg(id_arg()).arg(amount_arg()))
        .subcommand(Command::new("toggle").arg(id_arg()))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn liability_cmd() -> Command {
    Command::new("liability")
        .about("Personal loans and EMIs")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("lender"))
                .arg(req("type").help("home|car|personal|education|gold|credit-card|business|other"))
                .arg(opt("label").help("Custom label for type 'other'"))
                .arg(req("start"))
                .arg(opt("total"))
                .arg(opt("outstanding"))
                .arg(opt("emi"))
                .arg(opt("emi-day").value_parser(value_parser!(u32)))
                .arg(opt("next").help("Next EMI date, YYYY-MM-DD"))
                .arg(opt("note")),
        )
        .subcommand(Command::new("list").arg(json_flag()))
        .subcommand(
            Command::new("pay")
                .arg(id_arg())
                .arg(amount_arg())
                .arg(opt("date").help("Payment date, defaults to today")),
        )
        .subcommand(Command::new("close").arg(id_arg()))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn insurance_cmd() -> Command {
    Command::new("insurance")
        .about("Life insurance premiums")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("provider"))
                .arg(req("plan"))
                .arg(req("amount"))
                .arg(req("due"))
                .arg(opt("note")),
        )
        .subcommand(Command::new("list").arg(json_flag()))
        .subcommand(Command::new("toggle").arg(id_arg()))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn recurring_cmd() -> Command {
    Command::new("recurring")
        .about("Fixed monthly bills")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("title"))
                .arg(req("category"))
                .arg(req("amount"))
                .arg(opt("icon")),
        )
        .subcommand(Command::new("list").arg(month_opt()).arg(json_flag()))
        .subcommand(Command::new("toggle").arg(id_arg()).arg(month_opt()))
        .subcommand(
            Command::new("active")
                .arg(id_arg())
                .arg(switch("state").required(true)),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Budgets, category limits and preferences")
        .subcommand_required(true)
        .subcommand(Command::new("spending").arg(amount_arg()))
        .subcommand(Command::new("savings").arg(amount_arg()))
        .subcommand(
            Command::new("month")
                .arg(Arg::new("month").required(true))
                .arg(Arg::new("amount").required_unless_present("clear"))
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("amount"),
                ),
        )
        .subcommand(
            Command::new("limit")
                .arg(Arg::new("category").required(true))
                .arg(amount_arg()),
        )
        .subcommand(Command::new("unlimit").arg(Arg::new("category").required(true)))
        .subcommand(
            Command::new("carry")
                .arg(opt("spending").value_parser(BoolishValueParser::new()))
                .arg(opt("savings").value_parser(BoolishValueParser::new())),
        )
        .subcommand(
            Command::new("adjust")
                .arg(opt("assets"))
                .arg(opt("liabilities"))
                .arg(opt("essential"))
                .arg(opt("target-months").value_parser(value_parser!(u32))),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Derived views over the tracker")
        .subcommand_required(true)
        .subcommand(Command::new("summary").arg(json_flag()))
        .subcommand(Command::new("categories").arg(month_opt()).arg(json_flag()))
        .subcommand(Command::new("limits").arg(month_opt()).arg(json_flag()))
        .subcommand(Command::new("spending").arg(json_flag()))
        .subcommand(Command::new("networth").arg(json_flag()))
        .subcommand(Command::new("trend").arg(json_flag()))
        .subcommand(Command::new("readiness").arg(json_flag()))
        .subcommand(Command::new("recurring").arg(month_opt()).arg(json_flag()))
        .subcommand(Command::new("dues").arg(days_arg()).arg(json_flag()))
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Write an export file")
        .subcommand_required(true)
        .subcommand(Command::new("json").arg(out_arg()))
        .subcommand(Command::new("csv").arg(out_arg()))
}

pub fn build_cli() -> Command {
    Command::new("walletwise")
        .version(crate_version!())
        .about("Personal finance tracker: spending, savings, lending, loans and net worth")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite file (overrides WALLETWISE_DB)"),
        )
        .subcommand(currency_cmd())
        .subcommand(month_cmd())
        .subcommand(window_cmd())
        .subcommand(expense_cmd())
        .subcommand(goal_cmd())
        .subcommand(invest_cmd())
        .subcommand(lend_cmd())
        .subcommand(liability_cmd())
        .subcommand(insurance_cmd())
        .subcommand(recurring_cmd())
        .subcommand(budget_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check the tracker for inconsistencies"))
        .subcommand(Command::new("reset").about("Replace everything with the starter dataset"))
}
