//! Country names as they appear at the end of Google Maps place names, and
//! their ISO 3166-1 alpha-2 codes.

use std::collections::HashMap;
use std::sync::LazyLock;

use atlas_core::CountryMatch;

/// Name or alias → ISO code. Keys are matched exactly, case-sensitively.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("United States of America", "US"),
    ("USA", "US"),
    ("United Kingdom", "GB"),
    ("UK", "GB"),
    ("Great Britain", "GB"),
    ("Japan", "JP"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("Italy", "IT"),
    ("Spain", "ES"),
    ("Portugal", "PT"),
    ("Netherlands", "NL"),
    ("Belgium", "BE"),
    ("Switzerland", "CH"),
    ("Austria", "AT"),
    ("Australia", "AU"),
    ("New Zealand", "NZ"),
    ("Canada", "CA"),
    ("Mexico", "MX"),
    ("Brazil", "BR"),
    ("Argentina", "AR"),
    ("Chile", "CL"),
    ("China", "CN"),
    ("South Korea", "KR"),
    ("Korea", "KR"),
    ("Taiwan", "TW"),
    ("Thailand", "TH"),
    ("Vietnam", "VN"),
    ("Indonesia", "ID"),
    ("Malaysia", "MY"),
    ("Singapore", "SG"),
    ("Philippines", "PH"),
    ("India", "IN"),
    ("Russia", "RU"),
    ("Turkey", "TR"),
    ("Greece", "GR"),
    ("Egypt", "EG"),
    ("South Africa", "ZA"),
    ("Morocco", "MA"),
    ("Kenya", "KE"),
    ("Ireland", "IE"),
    // Constituent nations resolve to the sovereign state.
    ("Scotland", "GB"),
    ("Wales", "GB"),
    ("England", "GB"),
    ("Poland", "PL"),
    ("Czech Republic", "CZ"),
    ("Czechia", "CZ"),
    ("Hungary", "HU"),
    ("Sweden", "SE"),
    ("Norway", "NO"),
    ("Denmark", "DK"),
    ("Finland", "FI"),
    ("Iceland", "IS"),
    ("Croatia", "HR"),
    ("Slovenia", "SI"),
    ("Slovakia", "SK"),
    ("Romania", "RO"),
    ("Bulgaria", "BG"),
    ("Serbia", "RS"),
    ("Ukraine", "UA"),
    ("Israel", "IL"),
    ("United Arab Emirates", "AE"),
    ("UAE", "AE"),
    ("Saudi Arabia", "SA"),
    ("Qatar", "QA"),
    ("Peru", "PE"),
    ("Colombia", "CO"),
    ("Ecuador", "EC"),
    ("Cuba", "CU"),
    ("Jamaica", "JM"),
    ("Costa Rica", "CR"),
    ("Panama", "PA"),
    ("Puerto Rico", "PR"),
    ("Hawaii", "US"),
    ("Alaska", "US"),
];

static COUNTRY_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRY_CODES.iter().copied().collect());

/// Looks up the ISO code for an exact country name or alias.
#[must_use]
pub fn lookup_country_code(name: &str) -> Option<&'static str> {
    COUNTRY_INDEX.get(name).copied()
}

/// Reads the country from the last comma-separated segment of a place name.
///
/// Place names follow `Place, City[, Region], Country`. A name without a comma
/// carries no country. The trailing segment is rejected when it is shorter
/// than two characters or all digits (a postcode, for instance). A country
/// missing from the table is still returned, without a code.
#[must_use]
pub fn extract_country(name: &str) -> Option<CountryMatch> {
    let segments: Vec<&str> = name.split(',').map(str::trim).collect();
    if segments.len() < 2 {
        return None;
    }

    let candidate = *segments.last()?;
    if candidate.chars().count() < 2 || candidate.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(CountryMatch {
        country: candidate.to_string(),
        country_code: lookup_country_code(candidate).map(str::to_string),
    })
}
