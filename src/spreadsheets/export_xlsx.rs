use crate::domain::OfferRow;
use crate::errors::AppError;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;

// Review sheet column order; the status cell is color-coded so
// qualifying offers stand out at a glance.
const HEADERS: [&str; 15] = [
    "Status",
    "Closest Station",
    "Base Cost",
    "Total Cost",
    "URL",
    "Area",
    "Address",
    "Walking Time",
    "Transit Time",
    "Rent",
    "Offer ID",
    "Slug",
    "Available From",
    "Total Monthly Cost",
    "Key Advantages",
];

pub fn export_offers_xlsx(offers: &[OfferRow], path: &Path) -> Result<(), AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let green = Format::new().set_background_color(Color::Green);
    let red = Format::new().set_background_color(Color::Red);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| AppError::Xlsx(format!("Failed to write header '{header}': {e}")))?;
    }

    for (i, offer) in offers.iter().enumerate() {
        let r = (i + 1) as u32;

        let status_format = if offer.status == "GREEN" { &green } else { &red };
        worksheet
            .write_string_with_format(r, 0, &offer.status, status_format)
            .map_err(|e| AppError::Xlsx(format!("Failed to write status: {e}")))?;

        worksheet
            .write_string(r, 1, &offer.closest_station)
            .map_err(|e| AppError::Xlsx(format!("Failed to write station: {e}")))?;

        worksheet
            .write_number(r, 2, offer.base_cost)
            .map_err(|e| AppError::Xlsx(format!("Failed to write base cost: {e}")))?;

        worksheet
            .write_number(r, 3, offer.total_cost)
            .map_err(|e| AppError::Xlsx(format!("Failed to write total cost: {e}")))?;

        worksheet
            .write_string(r, 4, &offer.url)
            .map_err(|e| AppError::Xlsx(format!("Failed to write url: {e}")))?;

        worksheet
            .write_string(r, 5, &offer.area)
            .map_err(|e| AppError::Xlsx(format!("Failed to write area: {e}")))?;

        worksheet
            .write_string(r, 6, &offer.address)
            .map_err(|e| AppError::Xlsx(format!("Failed to write address: {e}")))?;

        worksheet
            .write_string(r, 7, &offer.walking_time)
            .map_err(|e| AppError::Xlsx(format!("Failed to write walking time: {e}")))?;

        worksheet
            .write_string(r, 8, &offer.transit_time)
            .map_err(|e| AppError::Xlsx(format!("Failed to write transit time: {e}")))?;

        worksheet
            .write_number(r, 9, offer.rent)
            .map_err(|e| AppError::Xlsx(format!("Failed to write rent: {e}")))?;

        worksheet
            .write_string(r, 10, &offer.offer_id)
            .map_err(|e| AppError::Xlsx(format!("Failed to write offer id: {e}")))?;

        worksheet
            .write_string(r, 11, &offer.slug)
            .map_err(|e| AppError::Xlsx(format!("Failed to write slug: {e}")))?;

        worksheet
            .write_string(r, 12, &offer.available_from)
            .map_err(|e| AppError::Xlsx(format!("Failed to write available from: {e}")))?;

        worksheet
            .write_string(r, 13, &offer.total_monthly_cost)
            .map_err(|e| AppError::Xlsx(format!("Failed to write total monthly cost: {e}")))?;

        worksheet
            .write_string(r, 14, &offer.key_advantages)
            .map_err(|e| AppError::Xlsx(format!("Failed to write key advantages: {e}")))?;
    }

    workbook
        .save(path)
        .map_err(|e| AppError::Xlsx(format!("Failed to save workbook: {e}")))?;

    Ok(())
}
