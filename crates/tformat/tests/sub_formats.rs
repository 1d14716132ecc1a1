//! Integration tests for the number, date, time and choice sub-formats.

use time::macros::datetime;

use tformat::{
    ChoiceFormat, CompiledPattern, DatePattern, DecimalPattern, FormatError, LocaleId, PatternError,
    Value, args,
};

fn format_in(locale: &LocaleId, raw: &str, args: &[Value]) -> Result<String, FormatError> {
    CompiledPattern::compile(raw, locale).unwrap().format(Some(args))
}

fn format_us(raw: &str, args: &[Value]) -> String {
    format_in(&LocaleId::US, raw, args).unwrap()
}

// =========================================================================
// Number Styles
// =========================================================================

#[test]
fn number_default_groups_digits() {
    assert_eq!(format_us("{0,number}", &args![1234567.891]), "1,234,567.891");
}

#[test]
fn number_integer_rounds_away_fraction() {
    assert_eq!(format_us("{0,number,integer}", &args![2.6]), "3");
    assert_eq!(format_us("{0,number,integer}", &args![-1234.2]), "-1,234");
}

#[test]
fn number_percent_scales_by_hundred() {
    assert_eq!(format_us("{0,number,percent}", &args![0.25]), "25%");
}

#[test]
fn number_percent_uses_german_affix() {
    let text = format_in(&LocaleId::GERMANY, "{0,number,percent}", &args![0.5]).unwrap();
    assert_eq!(text, "50\u{a0}%");
}

#[test]
fn number_currency_uses_region_symbol() {
    assert_eq!(format_us("{0,number,currency}", &args![1234.5]), "$1,234.50");

    let german = format_in(&LocaleId::GERMANY, "{0,number,currency}", &args![1234.5]).unwrap();
    assert_eq!(german, "1.234,50\u{a0}€");
}

#[test]
fn number_currency_follows_region_currency() {
    let locale = |tag: &str| tag.parse::<LocaleId>().unwrap();
    let amount = args![1234.5];

    assert_eq!(format_in(&locale("en-CA"), "{0,number,currency}", &amount).unwrap(), "$1,234.50");
    assert_eq!(format_in(&locale("en-AU"), "{0,number,currency}", &amount).unwrap(), "$1,234.50");
    assert_eq!(
        format_in(&locale("pt-BR"), "{0,number,currency}", &amount).unwrap(),
        "R$\u{a0}1.234,50"
    );

    let polish = format_in(&locale("pl-PL"), "{0,number,currency}", &amount).unwrap();
    assert!(polish.ends_with(",50\u{a0}zł"), "{polish}");
    let swedish = format_in(&locale("sv-SE"), "{0,number,currency}", &amount).unwrap();
    assert!(swedish.ends_with(",50\u{a0}kr"), "{swedish}");
}

#[test]
fn number_currency_uses_minor_units() {
    let japan: LocaleId = "ja-JP".parse().unwrap();
    assert_eq!(format_in(&japan, "{0,number,currency}", &args![1234]).unwrap(), "¥1,234");
}

#[test]
fn number_currency_without_local_symbol_uses_iso_code() {
    let romania: LocaleId = "ro-RO".parse().unwrap();
    let text = format_in(&romania, "{0,number,currency}", &args![5]).unwrap();
    assert_eq!(text, "5,00\u{a0}RON");
}

#[test]
fn number_currency_negative_subpattern() {
    let dutch: LocaleId = "nl-NL".parse().unwrap();
    let text = format_in(&dutch, "{0,number,currency}", &args![-3]).unwrap();
    assert_eq!(text, "€\u{a0}-3,00");
}

#[test]
fn number_percent_placement_follows_language() {
    let french: LocaleId = "fr-FR".parse().unwrap();
    let turkish: LocaleId = "tr-TR".parse().unwrap();
    assert_eq!(format_in(&french, "{0,number,percent}", &args![0.5]).unwrap(), "50\u{202f}%");
    assert_eq!(format_in(&turkish, "{0,number,percent}", &args![0.5]).unwrap(), "%50");
}

#[test]
fn number_currency_without_region_uses_generic_sign() {
    let english: LocaleId = "en".parse().unwrap();
    assert_eq!(format_in(&english, "{0,number,currency}", &args![3]).unwrap(), "¤3.00");
}

#[test]
fn number_pattern_pads_fraction() {
    assert_eq!(format_us("{0,number,#,##0.00}", &args![1234.5]), "1,234.50");
}

#[test]
fn number_pattern_without_grouping() {
    assert_eq!(format_us("{0,number,0.###}", &args![1234.5]), "1234.5");
}

#[test]
fn number_pattern_with_literal_affixes() {
    assert_eq!(format_us("{0,number,~#0 pts}", &args![42]), "~42 pts");
}

#[test]
fn number_pattern_with_percent_suffix() {
    assert_eq!(format_us("{0,number,0.#%}", &args![0.125]), "12.5%");
}

#[test]
fn number_pattern_negative_subpattern() {
    assert_eq!(format_us("{0,number,#;(#)}", &args![-5]), "(5)");
    assert_eq!(format_us("{0,number,#;(#)}", &args![5]), "5");
}

#[test]
fn number_pattern_minimum_integer_digits() {
    assert_eq!(format_us("{0,number,000}", &args![7]), "007");
}

#[test]
fn number_on_text_is_a_type_mismatch() {
    let err = format_in(&LocaleId::US, "{0,number}", &args!["seven"]).unwrap_err();
    assert_eq!(
        err,
        FormatError::TypeMismatch {
            expected: "number",
            found: "text"
        }
    );
}

#[test]
fn malformed_number_pattern_fails_to_compile() {
    let err = CompiledPattern::compile("{0,number,#.0#0}", &LocaleId::US).unwrap_err();
    assert!(matches!(err, PatternError::InvalidNumberPattern { .. }));
}

// =========================================================================
// Date and Time Styles
// =========================================================================

#[test]
fn date_custom_pattern() {
    let moment = datetime!(2024-03-07 10:15:30 UTC);
    assert_eq!(format_us("{0,date,dd.MM.yyyy}", &args![moment]), "07.03.2024");
}

#[test]
fn time_custom_pattern() {
    let moment = datetime!(2024-03-07 21:05:09 UTC);
    assert_eq!(format_us("{0,time,HH:mm:ss}", &args![moment]), "21:05:09");
    assert_eq!(format_us("{0,time,h:mm a}", &args![moment]), "9:05 PM");
}

#[test]
fn date_accepts_epoch_milliseconds() {
    assert_eq!(format_us("{0,date,yyyy-MM-dd}", &args![0]), "1970-01-01");
    assert_eq!(
        format_us("{0,date,yyyy-MM-dd HH:mm}", &args![86_400_000i64 + 3_600_000]),
        "1970-01-02 01:00"
    );
}

#[test]
fn date_named_styles_include_the_year() {
    let moment = datetime!(2024-03-07 10:15 UTC);
    for style in ["", "short", "medium", "long", "full"] {
        let pattern = format!("{{0,date,{style}}}");
        let text = format_us(&pattern, &args![moment]);
        assert!(text.contains("24"), "style '{style}' produced '{text}'");
    }
}

#[test]
fn untyped_date_time_is_not_empty() {
    let moment = datetime!(2024-03-07 10:15 UTC);
    let text = format_us("{0}", &args![moment]);
    assert!(text.contains("24"), "got '{text}'");
}

#[test]
fn date_on_text_is_a_type_mismatch() {
    let err = format_in(&LocaleId::US, "{0,date}", &args!["today"]).unwrap_err();
    assert_eq!(
        err,
        FormatError::TypeMismatch {
            expected: "date",
            found: "text"
        }
    );
}

#[test]
fn date_pattern_uses_locale_month_names() {
    let moment = datetime!(2024-03-07 10:15 UTC);
    let text = format_in(&LocaleId::GERMANY, "{0,date,dd. MMMM yyyy}", &args![moment]).unwrap();
    assert_eq!(text, "07. März 2024");
}

#[test]
fn date_pattern_uses_locale_weekday_names() {
    let moment = datetime!(2024-03-07 10:15 UTC);
    let text = format_in(&LocaleId::GERMANY, "{0,date,EEEE}", &args![moment]).unwrap();
    assert_eq!(text, "Donnerstag");
    assert_eq!(format_us("{0,date,EEE, MMM d}", &args![moment]), "Thu, Mar 7");
}

#[test]
fn time_pattern_zone_is_the_utc_offset() {
    let moment = datetime!(2024-03-07 21:05 +1);
    assert_eq!(format_us("{0,time,HH:mm z}", &args![moment]), "21:05 GMT+1");
}

#[test]
fn unsupported_date_letter_fails_to_compile() {
    let err = CompiledPattern::compile("{0,date,ww}", &LocaleId::US).unwrap_err();
    assert!(matches!(err, PatternError::InvalidDatePattern { .. }));
}

// =========================================================================
// Choice
// =========================================================================

#[test]
fn choice_picks_greatest_limit_not_above_argument() {
    let raw = "{0,choice,0#none|1#one|1<many}";
    assert_eq!(format_us(raw, &args![0]), "none");
    assert_eq!(format_us(raw, &args![1]), "one");
    assert_eq!(format_us(raw, &args![1.5]), "many");
    assert_eq!(format_us(raw, &args![99]), "many");
}

#[test]
fn choice_below_every_limit_uses_first_label() {
    assert_eq!(format_us("{0,choice,0#none|1#one}", &args![-3]), "none");
}

#[test]
fn choice_supports_infinity_limits() {
    let raw = "{0,choice,-∞#negative|0#zero|0<positive}";
    assert_eq!(format_us(raw, &args![-100]), "negative");
    assert_eq!(format_us(raw, &args![0]), "zero");
    assert_eq!(format_us(raw, &args![0.5]), "positive");
}

#[test]
fn choice_rejects_descending_limits() {
    let err = CompiledPattern::compile("{0,choice,1#one|0#zero}", &LocaleId::US).unwrap_err();
    assert!(matches!(err, PatternError::InvalidChoicePattern { .. }));
}

#[test]
fn choice_on_text_is_a_type_mismatch() {
    let err = format_in(&LocaleId::US, "{0,choice,0#a|1#b}", &args!["x"]).unwrap_err();
    assert!(matches!(err, FormatError::TypeMismatch { .. }));
}

// =========================================================================
// Standalone
// =========================================================================

#[test]
fn sub_formats_compile_on_their_own() {
    assert_eq!(DatePattern::parse("dd.MM.yyyy").unwrap().source(), "dd.MM.yyyy");
    assert!(DecimalPattern::parse("#,##0.00").is_ok());
    assert_eq!(ChoiceFormat::parse("0#none|1#one").unwrap().select(1.0), "one");
}
