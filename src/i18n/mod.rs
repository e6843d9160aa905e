//! Portal string catalogues.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

pub const DEFAULT_LOCALE: &str = "en";

type Catalog = BTreeMap<&'static str, &'static str>;

static EN: Lazy<Catalog> = Lazy::new(|| {
    BTreeMap::from([
        ("nav.dashboard", "Dashboard"),
        ("nav.bookings", "Bookings"),
        ("nav.vouchers", "Vouchers"),
        ("nav.transport", "Transport"),
        ("nav.locator", "Pilgrim locator"),
        ("nav.training", "Training"),
        ("nav.leads", "Leads"),
        ("nav.agents", "Agents"),
        ("booking.package", "Package"),
        ("booking.travel_date", "Travel date"),
        ("booking.status", "Status"),
        ("voucher.verify", "Verify voucher"),
        ("transport.pickup", "Pickup"),
        ("transport.dropoff", "Drop-off"),
        ("lead.new", "New lead"),
        ("error.module_disabled", "This feature is not enabled for your account."),
        ("error.unauthenticated", "Please sign in again."),
    ])
});

static AR: Lazy<Catalog> = Lazy::new(|| {
    BTreeMap::from([
        ("nav.dashboard", "لوحة التحكم"),
        ("nav.bookings", "الحجوزات"),
        ("nav.vouchers", "القسائم"),
        ("nav.transport", "النقل"),
        ("nav.locator", "تحديد موقع المعتمر"),
        ("nav.training", "التدريب"),
        ("nav.leads", "العملاء المحتملون"),
        ("nav.agents", "الوكلاء"),
        ("booking.package", "الباقة"),
        ("booking.travel_date", "تاريخ السفر"),
        ("booking.status", "الحالة"),
        ("voucher.verify", "التحقق من القسيمة"),
        ("transport.pickup", "نقطة الانطلاق"),
        ("transport.dropoff", "نقطة الوصول"),
        ("error.module_disabled", "هذه الميزة غير مفعلة لحسابك."),
    ])
});

static ID: Lazy<Catalog> = Lazy::new(|| {
    BTreeMap::from([
        ("nav.dashboard", "Dasbor"),
        ("nav.bookings", "Pemesanan"),
        ("nav.vouchers", "Voucher"),
        ("nav.transport", "Transportasi"),
        ("nav.locator", "Pelacak jamaah"),
        ("nav.training", "Pelatihan"),
        ("nav.leads", "Prospek"),
        ("nav.agents", "Agen"),
        ("booking.package", "Paket"),
        ("booking.travel_date", "Tanggal keberangkatan"),
        ("booking.status", "Status"),
        ("voucher.verify", "Verifikasi voucher"),
        ("lead.new", "Prospek baru"),
        ("error.unauthenticated", "Silakan masuk kembali."),
    ])
});

pub const SUPPORTED_LOCALES: [&str; 3] = ["en", "ar", "id"];

/// `ar-SA`, `AR_sa` and `ar` all map to `ar`; unknown locales map to English.
pub fn normalize_locale(locale: &str) -> &'static str {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .find(|l| **l == language)
        .copied()
        .unwrap_or(DEFAULT_LOCALE)
}

fn catalog(locale: &str) -> &'static Catalog {
    match normalize_locale(locale) {
        "ar" => &AR,
        "id" => &ID,
        _ => &EN,
    }
}

/// Localized string for `key`; English when the locale lacks it, else the key itself.
pub fn translate<'a>(locale: &str, key: &'a str) -> &'a str {
    catalog(locale)
        .get(key)
        .or_else(|| EN.get(key))
        .copied()
        .unwrap_or(key)
}

/// Full catalogue for a locale with English filling the gaps.
pub fn messages(locale: &str) -> BTreeMap<&'static str, &'static str> {
    let mut merged = (*EN).clone();
    merged.extend(catalog(locale).iter().map(|(k, v)| (*k, *v)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_region_tags() {
        assert_eq!(normalize_locale("ar-SA"), "ar");
        assert_eq!(normalize_locale("ID_id"), "id");
        assert_eq!(normalize_locale("fr"), "en");
        assert_eq!(normalize_locale(""), "en");
    }

    #[test]
    fn falls_back_to_english_then_key() {
        assert_eq!(translate("ar", "nav.bookings"), "الحجوزات");
        assert_eq!(translate("ar", "lead.new"), "New lead");
        assert_eq!(translate("id", "nav.missing"), "nav.missing");
    }

    #[test]
    fn merged_catalogue_covers_every_english_key() {
        let id = messages("id");
        assert_eq!(id.len(), EN.len());
        assert_eq!(id["nav.transport"], "Transportasi");
        assert_eq!(id["transport.pickup"], "Pickup");
    }
}
