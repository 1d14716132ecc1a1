//! CLDR number data for the `currency` and `percent` styles.
//!
//! Region currencies follow the CLDR supplemental currency data (current
//! tender only). Symbols are the ones CLDR gives in each currency's home
//! locale; a currency without one renders its ISO 4217 code. Patterns are
//! the CLDR `latn` standard patterns and are evaluated by [`DecimalPattern`].
//!
//! [`DecimalPattern`]: super::DecimalPattern

use crate::types::LocaleId;

/// Symbol used when the locale names no region.
const GENERIC_SYMBOL: &str = "¤";

/// ISO 4217 code of the currency in use in each region, sorted by region.
#[rustfmt::skip]
const REGION_CURRENCIES: &[(&str, &str)] = &[
    ("AD", "EUR"), ("AE", "AED"), ("AF", "AFN"), ("AG", "XCD"), ("AI", "XCD"),
    ("AL", "ALL"), ("AM", "AMD"), ("AO", "AOA"), ("AR", "ARS"), ("AS", "USD"),
    ("AT", "EUR"), ("AU", "AUD"), ("AW", "AWG"), ("AX", "EUR"), ("AZ", "AZN"),
    ("BA", "BAM"), ("BB", "BBD"), ("BD", "BDT"), ("BE", "EUR"), ("BF", "XOF"),
    ("BG", "EUR"), ("BH", "BHD"), ("BI", "BIF"), ("BJ", "XOF"), ("BL", "EUR"),
    ("BM", "BMD"), ("BN", "BND"), ("BO", "BOB"), ("BQ", "USD"), ("BR", "BRL"),
    ("BS", "BSD"), ("BT", "BTN"), ("BV", "NOK"), ("BW", "BWP"), ("BY", "BYN"),
    ("BZ", "BZD"), ("CA", "CAD"), ("CC", "AUD"), ("CD", "CDF"), ("CF", "XAF"),
    ("CG", "XAF"), ("CH", "CHF"), ("CI", "XOF"), ("CK", "NZD"), ("CL", "CLP"),
    ("CM", "XAF"), ("CN", "CNY"), ("CO", "COP"), ("CR", "CRC"), ("CU", "CUP"),
    ("CV", "CVE"), ("CW", "XCG"), ("CX", "AUD"), ("CY", "EUR"), ("CZ", "CZK"),
    ("DE", "EUR"), ("DJ", "DJF"), ("DK", "DKK"), ("DM", "XCD"), ("DO", "DOP"),
    ("DZ", "DZD"), ("EC", "USD"), ("EE", "EUR"), ("EG", "EGP"), ("EH", "MAD"),
    ("ER", "ERN"), ("ES", "EUR"), ("ET", "ETB"), ("FI", "EUR"), ("FJ", "FJD"),
    ("FK", "FKP"), ("FM", "USD"), ("FO", "DKK"), ("FR", "EUR"), ("GA", "XAF"),
    ("GB", "GBP"), ("GD", "XCD"), ("GE", "GEL"), ("GF", "EUR"), ("GG", "GBP"),
    ("GH", "GHS"), ("GI", "GIP"), ("GL", "DKK"), ("GM", "GMD"), ("GN", "GNF"),
    ("GP", "EUR"), ("GQ", "XAF"), ("GR", "EUR"), ("GS", "GBP"), ("GT", "GTQ"),
    ("GU", "USD"), ("GW", "XOF"), ("GY", "GYD"), ("HK", "HKD"), ("HM", "AUD"),
    ("HN", "HNL"), ("HR", "EUR"), ("HT", "HTG"), ("HU", "HUF"), ("ID", "IDR"),
    ("IE", "EUR"), ("IL", "ILS"), ("IM", "GBP"), ("IN", "INR"), ("IO", "USD"),
    ("IQ", "IQD"), ("IR", "IRR"), ("IS", "ISK"), ("IT", "EUR"), ("JE", "GBP"),
    ("JM", "JMD"), ("JO", "JOD"), ("JP", "JPY"), ("KE", "KES"), ("KG", "KGS"),
    ("KH", "KHR"), ("KI", "AUD"), ("KM", "KMF"), ("KN", "XCD"), ("KP", "KPW"),
    ("KR", "KRW"), ("KW", "KWD"), ("KY", "KYD"), ("KZ", "KZT"), ("LA", "LAK"),
    ("LB", "LBP"), ("LC", "XCD"), ("LI", "CHF"), ("LK", "LKR"), ("LR", "LRD"),
    ("LS", "LSL"), ("LT", "EUR"), ("LU", "EUR"), ("LV", "EUR"), ("LY", "LYD"),
    ("MA", "MAD"), ("MC", "EUR"), ("MD", "MDL"), ("ME", "EUR"), ("MF", "EUR"),
    ("MG", "MGA"), ("MH", "USD"), ("MK", "MKD"), ("ML", "XOF"), ("MM", "MMK"),
    ("MN", "MNT"), ("MO", "MOP"), ("MP", "USD"), ("MQ", "EUR"), ("MR", "MRU"),
    ("MS", "XCD"), ("MT", "EUR"), ("MU", "MUR"), ("MV", "MVR"), ("MW", "MWK"),
    ("MX", "MXN"), ("MY", "MYR"), ("MZ", "MZN"), ("NA", "NAD"), ("NC", "XPF"),
    ("NE", "XOF"), ("NF", "AUD"), ("NG", "NGN"), ("NI", "NIO"), ("NL", "EUR"),
    ("NO", "NOK"), ("NP", "NPR"), ("NR", "AUD"), ("NU", "NZD"), ("NZ", "NZD"),
    ("OM", "OMR"), ("PA", "PAB"), ("PE", "PEN"), ("PF", "XPF"), ("PG", "PGK"),
    ("PH", "PHP"), ("PK", "PKR"), ("PL", "PLN"), ("PM", "EUR"), ("PN", "NZD"),
    ("PR", "USD"), ("PS", "ILS"), ("PT", "EUR"), ("PW", "USD"), ("PY", "PYG"),
    ("QA", "QAR"), ("RE", "EUR"), ("RO", "RON"), ("RS", "RSD"), ("RU", "RUB"),
    ("RW", "RWF"), ("SA", "SAR"), ("SB", "SBD"), ("SC", "SCR"), ("SD", "SDG"),
    ("SE", "SEK"), ("SG", "SGD"), ("SH", "SHP"), ("SI", "EUR"), ("SJ", "NOK"),
    ("SK", "EUR"), ("SL", "SLE"), ("SM", "EUR"), ("SN", "XOF"), ("SO", "SOS"),
    ("SR", "SRD"), ("SS", "SSP"), ("ST", "STN"), ("SV", "USD"), ("SX", "XCG"),
    ("SY", "SYP"), ("SZ", "SZL"), ("TC", "USD"), ("TD", "XAF"), ("TF", "EUR"),
    ("TG", "XOF"), ("TH", "THB"), ("TJ", "TJS"), ("TK", "NZD"), ("TL", "USD"),
    ("TM", "TMT"), ("TN", "TND"), ("TO", "TOP"), ("TR", "TRY"), ("TT", "TTD"),
    ("TV", "AUD"), ("TW", "TWD"), ("TZ", "TZS"), ("UA", "UAH"), ("UG", "UGX"),
    ("UM", "USD"), ("US", "USD"), ("UY", "UYU"), ("UZ", "UZS"), ("VA", "EUR"),
    ("VC", "XCD"), ("VE", "VES"), ("VG", "USD"), ("VI", "USD"), ("VN", "VND"),
    ("VU", "VUV"), ("WF", "XPF"), ("WS", "WST"), ("XK", "EUR"), ("YE", "YER"),
    ("YT", "EUR"), ("ZA", "ZAR"), ("ZM", "ZMW"), ("ZW", "ZWG"),
];

/// Home-locale symbols, sorted by ISO code.
#[rustfmt::skip]
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("ARS", "$"), ("AUD", "$"), ("BDT", "৳"), ("BRL", "R$"), ("CAD", "$"),
    ("CLP", "$"), ("CNY", "¥"), ("COP", "$"), ("CZK", "Kč"), ("DKK", "kr."),
    ("EUR", "€"), ("GBP", "£"), ("GEL", "₾"), ("HKD", "HK$"), ("HUF", "Ft"),
    ("IDR", "Rp"), ("ILS", "₪"), ("INR", "₹"), ("ISK", "kr"), ("JPY", "¥"),
    ("KRW", "₩"), ("KZT", "₸"), ("MXN", "$"), ("MYR", "RM"), ("NGN", "₦"),
    ("NOK", "kr"), ("NZD", "$"), ("PHP", "₱"), ("PLN", "zł"), ("RUB", "₽"),
    ("SEK", "kr"), ("SGD", "$"), ("THB", "฿"), ("TRY", "₺"), ("TWD", "$"),
    ("UAH", "₴"), ("USD", "$"), ("UYU", "$"), ("VND", "₫"), ("ZAR", "R"),
];

/// The currency a locale formats amounts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Currency {
    pub(crate) symbol: &'static str,
    pub(crate) fraction_digits: i16,
}

impl Currency {
    const GENERIC: Currency = Currency {
        symbol: GENERIC_SYMBOL,
        fraction_digits: 2,
    };

    /// The currency of the locale's region.
    pub(crate) fn for_locale(locale: &LocaleId) -> Currency {
        let Some(code) = locale.country().and_then(region_currency) else {
            return Currency::GENERIC;
        };
        Currency {
            symbol: lookup(CURRENCY_SYMBOLS, code).unwrap_or(code),
            fraction_digits: fraction_digits(code),
        }
    }
}

fn region_currency(region: &str) -> Option<&'static str> {
    lookup(REGION_CURRENCIES, region)
}

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .binary_search_by_key(&key, |&(candidate, _)| candidate)
        .ok()
        .map(|found| table[found].1)
}

/// ISO 4217 minor units where they differ from two.
fn fraction_digits(code: &str) -> i16 {
    match code {
        "AFN" | "ALL" | "BIF" | "CLP" | "DJF" | "GNF" | "IQD" | "IRR" | "ISK" | "JPY" | "KMF"
        | "KPW" | "KRW" | "LAK" | "LBP" | "MGA" | "MMK" | "PYG" | "RSD" | "RWF" | "SOS" | "SYP"
        | "UGX" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" | "YER" => 0,
        "BHD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Standard currency pattern for `locale`.
pub(crate) fn currency_pattern(locale: &LocaleId) -> &'static str {
    match (locale.language(), locale.country()) {
        ("de", Some("AT" | "CH" | "LI")) | ("it", Some("CH")) | ("en", Some("AT" | "CH" | "NL")) => {
            "¤\u{a0}#,##0.00"
        }
        ("en", Some("BE" | "DE" | "DK" | "FI" | "SE" | "SI")) | ("pt", Some("PT" | "AO" | "MZ")) => {
            "#,##0.00\u{a0}¤"
        }
        ("es", Some("MX" | "US" | "419")) => "¤#,##0.00",
        (
            "en" | "zh" | "ja" | "ko" | "tr" | "th" | "id" | "ms" | "fil" | "hi" | "ga" | "mt"
            | "cy",
            _,
        ) => "¤#,##0.00",
        ("nl", _) => "¤\u{a0}#,##0.00;¤\u{a0}-#,##0.00",
        ("pt" | "nb" | "no" | "nn", _) => "¤\u{a0}#,##0.00",
        (
            "de" | "fr" | "es" | "it" | "pl" | "cs" | "sk" | "sv" | "da" | "fi" | "ru" | "uk" | "be"
            | "el" | "hu" | "ro" | "bg" | "hr" | "sr" | "sl" | "lt" | "lv" | "et" | "ca" | "eu"
            | "gl" | "is" | "vi" | "kk",
            _,
        ) => "#,##0.00\u{a0}¤",
        _ => "¤\u{a0}#,##0.00",
    }
}

/// Standard percent pattern for `locale`.
pub(crate) fn percent_pattern(locale: &LocaleId) -> &'static str {
    match (locale.language(), locale.country()) {
        ("de", Some("CH" | "LI")) | ("fr", Some("CH")) => "#,##0%",
        ("fr", _) => "#,##0\u{202f}%",
        ("tr", _) => "%#,##0",
        ("eu", _) => "%\u{a0}#,##0",
        (
            "de" | "es" | "ca" | "cs" | "sk" | "sv" | "da" | "nb" | "no" | "nn" | "fi" | "ru" | "be"
            | "ro" | "hr" | "sl" | "lt" | "is" | "gl",
            _,
        ) => "#,##0\u{a0}%",
        _ => "#,##0%",
    }
}
