//! Terminal table rendering for a stored snapshot.
//!
//! One row per listing in snapshot order, long titles and cities truncated
//! so columns stay aligned.

use crate::listing::Listing;

const TITLE_WIDTH: usize = 36;
const CITY_WIDTH: usize = 18;

pub fn render(listings: &[Listing]) -> String {
    if listings.is_empty() {
        return String::from("No listings in snapshot.\n");
    }

    let mut output = String::new();

    output.push_str(&format!(
        "{:>4}  {:tw$} {:>10} {:>12}  {:cw$} {:>8}\n",
        "#",
        "Title",
        "Price",
        "Mileage",
        "City",
        "Distance",
        tw = TITLE_WIDTH,
        cw = CITY_WIDTH
    ));
    output.push_str(&"-".repeat(TITLE_WIDTH + CITY_WIDTH + 42));
    output.push('\n');

    for (i, listing) in listings.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {:tw$} {:>10} {:>12}  {:cw$} {:>8}\n",
            i + 1,
            truncate(&listing.title, TITLE_WIDTH),
            listing.price,
            listing.mileage,
            truncate(&listing.city, CITY_WIDTH),
            listing.distance,
            tw = TITLE_WIDTH,
            cw = CITY_WIDTH
        ));
    }

    output.push_str(&format!("\n{} listings\n", listings.len()));

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}
