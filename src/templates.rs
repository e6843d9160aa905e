//! Bulk booking upload template.

/// Column order agents' spreadsheets are built against. Never reorder.
pub const BOOKING_TEMPLATE_COLUMNS: [&str; 11] = [
    "pilgrim_name",
    "passport_number",
    "nationality",
    "date_of_birth",
    "gender",
    "package_code",
    "room_type",
    "departure_date",
    "return_date",
    "phone",
    "email",
];

pub const BOOKING_TEMPLATE_FILENAME: &str = "bookings-template.csv";

/// The header row as CSV bytes, `\n` terminated.
pub fn booking_template_csv() -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(BOOKING_TEMPLATE_COLUMNS)?;
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
