//! Integration tests for template expansion

use chrono::TimeZone;
use chrono_tz::Europe::{Berlin, Moscow};
use chrono_tz::UTC;
use pretty_assertions::assert_eq;

use pathfmt::{format, formatf, try_formatf, Context, ContextBuilder, FormatError, Formatter};

fn context() -> Context {
    ContextBuilder::new()
        .add_formatter("date", UTC.with_ymd_and_hms(2016, 9, 10, 11, 12, 13).unwrap())
        .add_formatter("path", "/path/to/logs")
        .add_formatter("num", 12)
        .build()
        .expect("Should build")
}

fn expand(template: &str) -> Result<String, FormatError> {
    format(template, &context())
}

#[test]
fn test_log_name_with_date() {
    assert_eq!(
        expand("${path}/bos-k011/bos_srv-k011a.fss.log.${date | %Y%m%d }.gz").unwrap(),
        "/path/to/logs/bos-k011/bos_srv-k011a.fss.log.20160910.gz"
    );
}

#[test]
fn test_log_name_plus_one_day() {
    assert_eq!(
        expand("${path}/bos-k011/bos_srv-k011a.fss.log.${date + 1 day | %Y%m%d }.gz").unwrap(),
        "/path/to/logs/bos-k011/bos_srv-k011a.fss.log.20160911.gz"
    );
}

#[test]
fn test_log_name_minus_one_day() {
    assert_eq!(
        expand("${path}/bos-k011/bos_srv-k011a.fss.log.${date - 1 day | %Y%m%d }.gz").unwrap(),
        "/path/to/logs/bos-k011/bos_srv-k011a.fss.log.20160909.gz"
    );
}

#[test]
fn test_missing_operator_is_a_syntax_error() {
    let err = expand("${path}/bos-k011/bos_srv-k011a.fss.log.${date  1 day | %Y%m%d }.gz")
        .unwrap_err();
    assert!(matches!(err, FormatError::Syntax { .. }), "got {:?}", err);
}

#[test]
fn test_months_then_day() {
    assert_eq!(
        expand("${path}/bos-k011/bos_srv-k011a.fss.log.${date - 2 months 1 day | %Y%m%d }.gz")
            .unwrap(),
        "/path/to/logs/bos-k011/bos_srv-k011a.fss.log.20160709.gz"
    );
}

#[test]
fn test_delta_order_is_written_order() {
    let context = ContextBuilder::new()
        .add_formatter("date", UTC.with_ymd_and_hms(2016, 3, 31, 0, 0, 0).unwrap())
        .build()
        .unwrap();
    assert_eq!(
        format("${date - 1 month 1 day | %Y-%m-%d}", &context).unwrap(),
        "2016-02-28"
    );
    assert_eq!(
        format("${date - 1 day 1 month | %Y-%m-%d}", &context).unwrap(),
        "2016-02-29"
    );
}

#[test]
fn test_hours_cross_the_day() {
    assert_eq!(
        expand("${path}/bos-k011/bos_srv-k011a.fss.log.${date - 12 hours | %Y%m%d }.gz").unwrap(),
        "/path/to/logs/bos-k011/bos_srv-k011a.fss.log.20160909.gz"
    );
}

#[test]
fn test_quoted_pattern_with_space() {
    assert_eq!(
        expand(r#"${path}/bos-k011/bos_srv-k011a.fss.log.${date - 12 hours | "%Y%m%d %H%M%S" }.gz"#)
            .unwrap(),
        "/path/to/logs/bos-k011/bos_srv-k011a.fss.log.20160909 231213.gz"
    );
}

#[test]
fn test_zero_padded_counter() {
    assert_eq!(expand("${ num | 04 }").unwrap(), "0012");
}

#[test]
fn test_full_rotation_name() {
    assert_eq!(
        expand("${path}/x.${date - 2 months 1 day | %Y%m%d}.${num|04}").unwrap(),
        "/path/to/logs/x.20160709.0012"
    );
}

#[test]
fn test_bare_names() {
    assert_eq!(expand("$path$num").unwrap(), "/path/to/logs12");
    assert_eq!(expand("$path abc").unwrap(), "/path/to/logs abc");
}

#[test]
fn test_no_placeholders_is_identity() {
    for template in ["", "abc", "/var/log/app.log", "cost: $ 5", "{}{}"] {
        assert_eq!(expand(template).unwrap(), template);
    }
}

#[test]
fn test_concatenation() {
    let a = "${path}/x.";
    let b = "${date + 1 day | %Y%m%d}.$num";
    assert_eq!(
        expand(&format!("{}{}", a, b)).unwrap(),
        expand(a).unwrap() + &expand(b).unwrap()
    );
}

#[test]
fn test_explicit_index_into_named_entries() {
    assert_eq!(expand("${1}:${2|03}").unwrap(), "/path/to/logs:012");
}

#[test]
fn test_unknown_formatter() {
    let err = expand("${path}/${missing}").unwrap_err();
    assert_eq!(
        err,
        FormatError::UnknownFormatter {
            name: "missing".to_string(),
            span: 10..17
        }
    );
}

#[test]
fn test_time_without_pattern_is_rfc3339() {
    assert_eq!(expand("${date}").unwrap(), "2016-09-10T11:12:13+00:00");
}

#[test]
fn test_formatf_single_date() {
    let out = formatf(
        "${+1 day|%Y-%m-%d}",
        [UTC.with_ymd_and_hms(2018, 1, 15, 0, 0, 0).unwrap()],
    );
    assert_eq!(out, "2018-01-16");
}

#[test]
fn test_formatf_mixed_positional() {
    let date = UTC.with_ymd_and_hms(2018, 10, 19, 18, 0, 5).unwrap();
    assert_eq!(
        pathfmt::formatf!("${} ${} ${|1.1} ${1} ${|%Y}", "a", 2, 4.5, date),
        "a 2 4.5 2 2018"
    );
}

#[test]
fn test_formatf_implicit_never_repeats() {
    let out = pathfmt::formatf!("${}${0}${}${1}${}", "a", "b", "c");
    assert_eq!(out, "aabbc");
}

#[test]
fn test_formatf_malformed_placeholder_uses_sentinel() {
    let out = pathfmt::formatf!("x-${ | }-y", 1);
    insta::assert_snapshot!(out, @"x-%!(syntax error at 5..6: Missing pattern after '|')-y");
}

#[test]
fn test_try_formatf_index_out_of_range() {
    let err = try_formatf("${} ${}", [Formatter::from(1)]).unwrap_err();
    assert!(matches!(err, FormatError::IndexOutOfRange { index: 1, len: 1, .. }));
}

#[test]
fn test_year_in_moscow_matches_calendar_shift() {
    let date = Moscow.with_ymd_and_hms(1982, 10, 19, 18, 22, 33).unwrap();
    let context = ContextBuilder::new()
        .add_formatter("date", Formatter::from(date))
        .build()
        .unwrap();
    assert_eq!(
        format("${date + 1 year | \"%Y-%m-%d %H:%M:%S %z\"}", &context).unwrap(),
        "1983-10-19 18:22:33 +0300"
    );
}

#[test]
fn test_context_is_shared_across_threads() {
    let context = std::sync::Arc::new(context());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let context = context.clone();
            std::thread::spawn(move || format("${path}/${date|%Y}", &context).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "/path/to/logs/2016");
    }
}

#[test]
fn test_day_shift_lands_in_repeated_hour() {
    let context = ContextBuilder::new()
        .add_formatter("date", Berlin.with_ymd_and_hms(2016, 10, 31, 2, 30, 0).unwrap())
        .build()
        .unwrap();
    assert_eq!(
        format("${date - 1 day | \"%Y-%m-%d %H:%M %z\"}", &context).unwrap(),
        "2016-10-30 02:30 +0200"
    );
}

#[test]
fn test_day_shift_lands_in_skipped_hour() {
    let context = ContextBuilder::new()
        .add_formatter("date", Berlin.with_ymd_and_hms(2016, 3, 26, 2, 30, 0).unwrap())
        .build()
        .unwrap();
    assert_eq!(
        format("${date + 1 day | \"%Y-%m-%d %H:%M %z\"}", &context).unwrap(),
        "2016-03-27 03:30 +0200"
    );
}

#[test]
fn test_oversized_pattern_width_is_an_error() {
    let err = expand("${num|0100000}").unwrap_err();
    assert!(
        matches!(err, FormatError::InvalidPattern { ref reason, .. } if reason == "width is too large"),
        "got {:?}",
        err
    );
}
