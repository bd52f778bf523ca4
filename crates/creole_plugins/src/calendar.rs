use crate::num::parse_i32;
use creole_engine::{Context, EngineResult, Plugin, PluginCall, PluginOptions};

static DAYS_PER_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Weekday of the first day of the month, 0 = Monday, via the Julian day
/// number of that date.
fn first_weekday(year: i32, month: i32) -> i32 {
    let m1 = (month - 14) / 12;
    let y1 = (year + 4800) as i64;
    let m1 = m1 as i64;
    let month = month as i64;
    let jd = 1461 * (y1 + m1) / 4 + 367 * (month - 2 - 12 * m1) / 12
        - 3 * ((y1 + m1 + 100) / 100) / 4
        - 32074;
    jd.rem_euclid(7) as i32
}

fn run(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    let mut pos = 0usize;
    let mut year = parse_i32(call.body, &mut pos);
    let mut month = parse_i32(call.body, &mut pos);
    if year < 0 {
        year = 0;
    }
    if !(1..=12).contains(&month) {
        month = 1;
    }

    let weekday = first_weekday(year, month);
    let mut dmax = DAYS_PER_MONTH[(month - 1) as usize];
    if month == 2 && is_leap_year(year) {
        dmax = 29;
    }

    ctx.write_text(b"\n|=Mon|=Tue|=Wed|=Thu|=Fri|=Sat|=Sun\n")?;
    for _ in 0..weekday {
        ctx.write_text(b"|")?;
    }
    for day in 1..=dmax {
        ctx.write_text(format!("|{day}").as_bytes())?;
        if (day + weekday) % 7 == 0 {
            ctx.write_text(b"\n")?;
        }
    }
    ctx.write_text(b"\n\n")?;
    Ok(())
}

/// `<<calendar year month>>` — a month calendar as a table, emitted as
/// markup between paragraphs and parsed again.
pub const CALENDAR: Plugin = Plugin {
    name: "calendar",
    options: PluginOptions::REPARSE_OUTPUT.union(PluginOptions::BETWEEN_PAR),
    run,
};
