//! Display strings for the deployment's language.

use dashboard_core::DisplayLanguage;

#[derive(Debug)]
pub struct Labels {
    pub date: &'static str,
    pub transaction_id: &'static str,
    pub first_source: &'static str,
    pub first_medium: &'static str,
    pub first_campaign: &'static str,
    pub source: &'static str,
    pub medium: &'static str,
    pub campaign: &'static str,
    pub landing_page: &'static str,
    pub item_name: &'static str,
    pub revenue: &'static str,

    pub total_revenue: &'static str,
    pub total_transactions: &'static str,
    pub total_items: &'static str,
    pub average_transaction: &'static str,

    pub source_medium: &'static str,
    pub transactions: &'static str,
    pub share: &'static str,
    pub other: &'static str,

    pub previous: &'static str,
    pub next: &'static str,
    pub loading: &'static str,
    pub empty: &'static str,
    pub missing_dates: &'static str,
    pub unknown_error: &'static str,
    pub title: &'static str,
    pub revenue_by_source: &'static str,
    pub revenue_over_time: &'static str,
}

const HEBREW: Labels = Labels {
    date: "תאריך",
    transaction_id: "מזהה עסקה",
    first_source: "מקור ראשון",
    first_medium: "ערוץ ראשון",
    first_campaign: "קמפיין ראשון",
    source: "מקור סשן",
    medium: "ערוץ סשן",
    campaign: "קמפיין (UTM)",
    landing_page: "דף נחיתה",
    item_name: "שם מוצר",
    revenue: "הכנסה",

    total_revenue: "סה\"כ הכנסות",
    total_transactions: "עסקאות",
    total_items: "פריטים",
    average_transaction: "ממוצע לעסקה",

    source_medium: "מקור / ערוץ",
    transactions: "עסקאות",
    share: "נתח",
    other: "אחר",

    previous: "הקודם",
    next: "הבא",
    loading: "טוען נתונים...",
    empty: "לא נמצאו רכישות בטווח התאריכים שנבחר",
    missing_dates: "יש לבחור תאריך התחלה ותאריך סיום",
    unknown_error: "Unknown error",
    title: "דוח רכישות לפי מקור",
    revenue_by_source: "הכנסות לפי מקור",
    revenue_over_time: "הכנסות לאורך זמן",
};

const ENGLISH: Labels = Labels {
    date: "Date",
    transaction_id: "Transaction ID",
    first_source: "First Source",
    first_medium: "First Medium",
    first_campaign: "First Campaign",
    source: "Session Source",
    medium: "Session Medium",
    campaign: "Campaign (UTM)",
    landing_page: "Landing Page",
    item_name: "Item Name",
    revenue: "Revenue",

    total_revenue: "Total Revenue",
    total_transactions: "Transactions",
    total_items: "Items",
    average_transaction: "Average Order",

    source_medium: "Source / Medium",
    transactions: "Transactions",
    share: "Share",
    other: "Other",

    previous: "Previous",
    next: "Next",
    loading: "Loading data...",
    empty: "No purchases found in the selected date range",
    missing_dates: "Please select a start and end date",
    unknown_error: "Unknown error",
    title: "Purchases by Source",
    revenue_by_source: "Revenue by Source",
    revenue_over_time: "Revenue over Time",
};

impl Labels {
    pub fn for_language(language: DisplayLanguage) -> &'static Labels {
        match language {
            DisplayLanguage::Hebrew => &HEBREW,
            DisplayLanguage::English => &ENGLISH,
        }
    }
}

/// Text direction attribute for the page.
pub fn text_direction(language: DisplayLanguage) -> &'static str {
    match language {
        DisplayLanguage::Hebrew => "rtl",
        DisplayLanguage::English => "ltr",
    }
}

pub fn language_tag(language: DisplayLanguage) -> &'static str {
    match language {
        DisplayLanguage::Hebrew => "he",
        DisplayLanguage::English => "en",
    }
}
