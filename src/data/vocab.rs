//! Vocabulary Module
//! Fixed cause-of-death labels, chart aliases and age-group tables of the dataset.

/// Reserved cause label carrying the all-cause total of a year.
pub const TOTAL_CAUSE: &str = "Total";

/// Age group label whose columns are excluded from the tidy table.
pub const AGE_UNKNOWN: &str = "age unknown";

pub const BREAST_CANCER: &str = "Malignant neoplasms of breast";

/// Aggregate of all cancer types, excluded from per-type comparisons.
pub const ALL_MALIGNANT_NEOPLASMS: &str = "Malignant neoplasms";

/// ICD-10 chapters plus the reserved total.
pub const PRIMARY_DEATH_CAUSES: [&str; 20] = [
    "Certain infectious and parasitic diseases",
    "Malignant neoplasms",
    "Benign neoplasms",
    "Diseases of the blood and blood-forming organs",
    "Endocrine, nutritional and metabolic diseases",
    "Mental and behavioural disorders",
    "Diseases of the nervous system and sensory organs",
    "Diseases of the circulatory system",
    "Diseases of the respiratory system",
    "Diseases of the digestive system",
    "Diseases of the skin and subcutaneous tissue",
    "Diseases of musculoskeletal sys. a. connec. tissue",
    "Diseases of the genitourinary system",
    "Pregnancy, childbirth and the puerperium",
    "Certain conditions origin. in the perinatal period",
    "Congenital malform.,deform. a. chromosomal abnorm.",
    "Symp., signs a. abnormal clinical a. lab. findings",
    "Other ill-defined and unknown causes of mortality",
    "External causes of morbidity and mortality",
    TOTAL_CAUSE,
];

pub const CANCER_TYPES: [&str; 18] = [
    "Malignant neoplasms",
    "Malignant neoplasms of lip, oral cavity, pharynx",
    "Malignant neoplasms of oesophagus",
    "Malignant neoplasms of stomach",
    "Malignant neoplasms of colon",
    "Malig. neopl. of rectum, anus, rectosigmoid junction",
    "Malig. neoplasms of liver, intrahepatic bile ducts",
    "Malignant neoplasms of pancreas",
    "Malignant neoplasms of bronchus and lung",
    "Melanoma and other malignant neoplasms of skin",
    "Malignant neoplasms of breast",
    "Malignant neoplasms of cervix uteri",
    "Malig. neopl. of corpus uteri, uterus, part unspec.",
    "Malignant neoplasms of ovary",
    "Malignant neoplasms of prostate",
    "Malignant neoplasms of kidney, except renal pelvis",
    "Malignant neoplasms of bladder",
    "Malig. neopl.of lymphoid, haematopoietic, rel. tissue",
];

/// Cancers merged into [`FEMALE_REPRODUCTIVE_SYSTEM`] for the by-sex comparison.
pub const FEMALE_REPRODUCTIVE_CANCERS: [&str; 3] = [
    "Malignant neoplasms of cervix uteri",
    "Malig. neopl. of corpus uteri, uterus, part unspec.",
    "Malignant neoplasms of ovary",
];

pub const FEMALE_REPRODUCTIVE_SYSTEM: &str = "Malignant neoplasms of female reproductive system";

/// Short chart labels for cancer types, in chart order.
pub const CANCER_ALIASES: [(&str, &str); 15] = [
    ("Malig. neoplasms of liver, intrahepatic bile ducts", "liver, intrahepatic bile duct"),
    ("Malignant neoplasms of bladder", "bladder"),
    ("Malignant neoplasms of breast", "breast"),
    ("Malignant neoplasms of bronchus and lung", "bronchus and lung"),
    ("Malignant neoplasms of colon", "colon"),
    ("Malignant neoplasms of kidney, except renal pelvis", "kidney, except renal pelvis"),
    ("Malignant neoplasms of lip, oral cavity, pharynx", "lip, oral cavity, pharynx"),
    ("Malig. neopl.of lymphoid, haematopoietic, rel. tissue", "lymphoid, haematopoietic tissue"),
    ("Malignant neoplasms of oesophagus", "oesophagus"),
    ("Malignant neoplasms of pancreas", "pancreas"),
    ("Malignant neoplasms of prostate", "prostate"),
    ("Malig. neopl. of rectum, anus, rectosigmoid junction", "rectum, anus"),
    ("Malignant neoplasms of stomach", "stomach"),
    ("Melanoma and other malignant neoplasms of skin", "skin"),
    (FEMALE_REPRODUCTIVE_SYSTEM, "female reproductive system"),
];

/// One age bucket of the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeGroup {
    pub label: &'static str,
    pub alias: &'static str,
    /// Representative age used for the median summary.
    pub midpoint: f64,
    /// The statistics office publishes no cause-specific data for this bucket.
    pub no_data: bool,
}

const fn age(label: &'static str, alias: &'static str, midpoint: f64, no_data: bool) -> AgeGroup {
    AgeGroup {
        label,
        alias,
        midpoint,
        no_data,
    }
}

/// Age buckets in ascending order.
pub const AGE_GROUPS: [AgeGroup; 17] = [
    age("under 1 year", "<1*", 0.5, true),
    age("1 to under 15 years", "1-14*", 7.5, true),
    age("15 to under 20 years", "15-19*", 17.5, true),
    age("20 to under 25 years", "20-24", 22.5, false),
    age("25 to under 30 years", "25-29", 27.5, false),
    age("30 to under 35 years", "30-34", 32.5, false),
    age("35 to under 40 years", "35-39", 37.5, false),
    age("40 to under 45 years", "40-44", 42.5, false),
    age("45 to under 50 years", "45-49", 47.5, false),
    age("50 to under 55 years", "50-54", 52.5, false),
    age("55 to under 60 years", "55-59", 57.5, false),
    age("60 to under 65 years", "60-64", 62.5, false),
    age("65 to under 70 years", "65-69", 67.5, false),
    age("70 to under 75 years", "70-74", 72.5, false),
    age("75 to under 80 years", "75-79", 77.5, false),
    age("80 to under 85 years", "80-84", 82.5, false),
    // Open-ended bucket, assumed centred at 90.
    age("85 years and over", ">85", 90.0, false),
];

/// Look up the chart alias of a cancer type, falling back to the label itself.
pub fn cancer_alias(cause: &str) -> &str {
    CANCER_ALIASES
        .iter()
        .find(|(label, _)| *label == cause)
        .map(|(_, alias)| *alias)
        .unwrap_or(cause)
}

pub fn age_group(label: &str) -> Option<&'static AgeGroup> {
    AGE_GROUPS.iter().find(|g| g.label == label)
}

pub fn is_primary_cause(cause: &str) -> bool {
    PRIMARY_DEATH_CAUSES.contains(&cause)
}

pub fn is_cancer_type(cause: &str) -> bool {
    CANCER_TYPES.contains(&cause)
}
