use std::io::{self, Write};
use std::process;

use chrono::{NaiveDate, Weekday};
use getopts::Options;

pub struct Args {
    pub week_start_day: Option<Weekday>,
    pub target_week: Option<NaiveDate>,
}

pub const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

pub fn day_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize].1
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "d",
        "week-start-day",
        "Weekday the filtering week begins on, e.g. Monday [Default: prompt]",
        "DAY",
    );
    opts.optopt(
        "w",
        "target-week",
        "Any date inside the week to filter for, as YYYY-MM-DD [Default: prompt]",
        "DATE",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    let week_start_day = matches.opt_str("week-start-day").map(|raw| {
        match raw.parse::<Weekday>() {
            Ok(day) => day,
            Err(_) => {
                eprintln!("Provided value for option 'week-start-day' is invalid: {raw}");
                process::exit(1);
            }
        }
    });

    let target_week = matches.opt_str("target-week").map(|raw| {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(err) => {
                eprintln!("Provided value for option 'target-week' is invalid: {err}");
                process::exit(1);
            }
        }
    });

    Args {
        week_start_day,
        target_week,
    }
}

/// Numbered weekday menu. Returns `None` when input is cancelled.
pub fn prompt_week_start_day() -> Option<Weekday> {
    println!("\nChoose your preferred week start day:");
    for (idx, (_, name)) in WEEKDAYS.iter().enumerate() {
        println!("{}. {}", idx + 1, name);
    }

    loop {
        let line = read_line("\nEnter your choice (1-7): ")?;
        match menu_choice(&line) {
            Some(day) => {
                println!("\nYou chose: {}", day_name(day));
                return Some(day);
            }
            None => println!("Please enter a number between 1 and 7."),
        }
    }
}

/// Accepts exactly the literal digits "1" through "7" (surrounding
/// whitespace aside), not other numeric spellings like "07" or "+7".
fn menu_choice(input: &str) -> Option<Weekday> {
    match input.trim() {
        choice @ ("1" | "2" | "3" | "4" | "5" | "6" | "7") => {
            let (day, _) = WEEKDAYS[(choice.as_bytes()[0] - b'1') as usize];
            Some(day)
        }
        _ => None,
    }
}

/// ISO date prompt with re-prompt on malformed input. Returns `None` when
/// input is cancelled.
pub fn prompt_target_week() -> Option<NaiveDate> {
    println!("\nEnter the start date of the week you want (YYYY-MM-DD format)");
    println!("Example: 2025-08-04 for the week starting August 4, 2025");

    loop {
        let line = read_line("\nEnter date (YYYY-MM-DD): ")?;
        match NaiveDate::parse_from_str(line.trim(), "%Y-%m-%d") {
            Ok(date) => {
                println!("\nYou chose week starting: {}", date.format("%Y-%m-%d"));
                return Some(date);
            }
            Err(_) => {
                println!("Invalid date format. Please use YYYY-MM-DD format (e.g., 2025-08-04)")
            }
        }
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => {
            println!("\nScript cancelled by user.");
            None
        }
        Ok(_) => Some(line),
    }
}
