// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Output as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("vaultflow")
        .about("Freelancer income, invoice, expense, and tax-reserve tracker")
        .version(crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("income")
                .about("Income events")
                .subcommand(
                    Command::new("add")
                        .about("Log an income event (tax slice frozen at entry)")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD, not in the future"))
                        .arg(Arg::new("client").long("client"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("rate").long("rate").help("Tax rate override in percent (0-60); defaults to the profile rate")),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List income events, newest first")
                        .arg(Arg::new("limit").long("limit").value_parser(clap::value_parser!(usize))),
                )),
        )
        .subcommand(
            Command::new("invoice")
                .about("Invoices and their lifecycle")
                .subcommand(
                    Command::new("create")
                        .about("Create a DRAFT invoice with the next VF reference")
                        .arg(Arg::new("client").long("client").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("due").long("due").required(true).help("Due date YYYY-MM-DD"))
                        .arg(Arg::new("currency").long("currency").help("Defaults to the profile currency")),
                )
                .subcommand(
                    Command::new("send")
                        .about("Mark a DRAFT invoice as SENT")
                        .arg(Arg::new("ref").required(true)),
                )
                .subcommand(
                    Command::new("mark-overdue")
                        .about("Explicitly transition a SENT invoice to OVERDUE")
                        .arg(Arg::new("ref").required(true)),
                )
                .subcommand(
                    Command::new("mark-paid")
                        .about("Mark an invoice PAID and record the income event")
                        .arg(Arg::new("ref").required(true))
                        .arg(Arg::new("date").long("date").help("Paid date YYYY-MM-DD, defaults to today")),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List invoices with age and urgency tier")
                        .arg(
                            Arg::new("open")
                                .long("open")
                                .action(ArgAction::SetTrue)
                                .help("Only non-PAID invoices"),
                        ),
                ))
                .subcommand(
                    Command::new("followup")
                        .about("Draft a payment follow-up for an unpaid invoice")
                        .arg(Arg::new("ref").required(true)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Expenses and categorization")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense and categorize it")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(
                            Arg::new("no-ai")
                                .long("no-ai")
                                .action(ArgAction::SetTrue)
                                .help("Skip the hosted categorizer; use keyword rules"),
                        ),
                )
                .subcommand(
                    Command::new("review")
                        .about("Mark an expense reviewed, optionally overriding the category")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("deductible").long("deductible").help("true/false")),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(
                            Arg::new("unreviewed")
                                .long("unreviewed")
                                .action(ArgAction::SetTrue),
                        ),
                )),
        )
        .subcommand(
            Command::new("bill")
                .about("Recurring committed bills")
                .subcommand(
                    Command::new("add")
                        .about("Add a recurring bill")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("WEEKLY, MONTHLY, QUARTERLY, or YEARLY"),
                        )
                        .arg(Arg::new("next-due").long("next-due").required(true)),
                )
                .subcommand(
                    Command::new("deactivate")
                        .about("Soft-delete a bill; history keeps referencing it")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include deactivated bills"),
                        ),
                )),
        )
        .subcommand(
            Command::new("profile")
                .about("User profile and collaborator endpoints")
                .subcommand(
                    Command::new("set")
                        .about("Update profile settings")
                        .arg(Arg::new("tax-rate").long("tax-rate").help("Default tax rate in percent (0-60)"))
                        .arg(Arg::new("gst").long("gst").help("true/false"))
                        .arg(Arg::new("currency").long("currency")),
                )
                .subcommand(with_json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set-endpoint")
                        .about("Configure hosted AI collaborator endpoints")
                        .arg(Arg::new("categorize").long("categorize"))
                        .arg(Arg::new("followup").long("followup")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived financial aggregates")
                .subcommand(with_json_flags(
                    Command::new("summary").about("Gross, tax reserve, bills, real balance"),
                ))
                .subcommand(with_json_flags(
                    Command::new("trend")
                        .about("Trailing running total of net income")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .value_parser(clap::value_parser!(usize))
                                .help("Window length in days (default 30)"),
                        ),
                ))
                .subcommand(with_json_flags(
                    Command::new("deductibles")
                        .about("Deductible expenses and estimated tax saving"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export records to CSV")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("income")
                        .long("income")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("expenses"),
                )
                .arg(
                    Arg::new("expenses")
                        .long("expenses")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("doctor").about("Run integrity checks on stored records"))
}
