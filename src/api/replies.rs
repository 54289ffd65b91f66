// src/api/replies.rs
//
// Reply text for the assistant. The wording is what the assistant reads back
// to the caller, so keep it plain and short.

use crate::api::models::{PropertyQueryRequest, PropertyResponse, ResponseData};
use crate::query::ListingView;
use std::fmt::Write as _;

/// Lists longer than this are cut in the reply text (the data keeps them all).
const MAX_BULLETS: usize = 5;

pub fn unknown_query_type() -> PropertyResponse {
    PropertyResponse::failed("I'm not sure how to handle that type of query.")
        .with_error("Unknown query type")
}

pub fn missing_address() -> PropertyResponse {
    PropertyResponse::failed("I need an address to look up property details.")
}

pub fn unavailable(error: &str) -> PropertyResponse {
    PropertyResponse::failed(
        "I'm having trouble accessing property information right now. Please try again.",
    )
    .with_error(error)
}

pub fn not_found(address: &str) -> PropertyResponse {
    PropertyResponse {
        property_found: Some(false),
        ..PropertyResponse::failed(format!(
            "I couldn't find a property at {address}. Could you double-check the address?"
        ))
    }
}

pub fn details(user_message: &str, view: ListingView) -> PropertyResponse {
    let message = user_message.to_lowercase();
    let text = if message.contains("bed") || message.contains("bath") {
        let mut text = format!(
            "{} has {} bedrooms and {} full bathrooms",
            view.address, view.beds, view.full_baths
        );
        if view.half_baths > 0 {
            let _ = write!(text, " plus {} half bath", view.half_baths);
        }
        text.push('.');
        text
    } else {
        let size = view
            .size
            .map(|s| format!(", {s} sq ft"))
            .unwrap_or_default();
        format!(
            "Here are the details for {}: {} bed/{} bath{}, {}/month.",
            view.address,
            view.beds,
            view.full_baths,
            size,
            money(view.rent)
        )
    };

    PropertyResponse {
        property_found: Some(true),
        ..PropertyResponse::ok(text).with_data(ResponseData::Listing(view))
    }
}

pub fn available(views: Vec<ListingView>) -> PropertyResponse {
    let text = match views.as_slice() {
        [] => {
            return PropertyResponse::ok(
                "I don't have any available properties that match your criteria right now.",
            )
        }
        [only] => format!(
            "I found 1 available property: {} - {} bed/{} bath for {}/month.",
            only.address,
            only.beds,
            only.full_baths,
            money(only.rent)
        ),
        many => {
            let mut text = format!(
                "I found {} available properties. Here are your options:\n",
                many.len()
            );
            for v in many.iter().take(MAX_BULLETS) {
                let _ = writeln!(
                    text,
                    "• {} - {} bed/{} bath, {}/month",
                    v.address,
                    v.beds,
                    v.full_baths,
                    money(v.rent)
                );
            }
            text
        }
    };

    PropertyResponse::ok(text).with_data(ResponseData::Listings { properties: views })
}

pub fn search(views: Vec<ListingView>) -> PropertyResponse {
    if views.is_empty() {
        return PropertyResponse::ok("I couldn't find any properties matching your search criteria.");
    }

    let mut text = format!("I found {} properties matching your search:\n", views.len());
    for v in views.iter().take(MAX_BULLETS) {
        let availability = if v.is_available { "Available" } else { "Occupied" };
        let _ = writeln!(
            text,
            "• {} - {} bed/{} bath, {}/month ({availability})",
            v.address,
            v.beds,
            v.full_baths,
            money(v.rent)
        );
    }

    PropertyResponse::ok(text).with_data(ResponseData::Listings { properties: views })
}

pub fn budget(request: &PropertyQueryRequest, views: Vec<ListingView>) -> PropertyResponse {
    if views.is_empty() {
        let range = match (request.min_rent(), request.max_rent()) {
            (Some(min), Some(max)) => format!("in the {}-{} range", money(min), money(max)),
            (None, Some(max)) => format!("under {}", money(max)),
            (Some(min), None) => format!("over {}", money(min)),
            (None, None) => "in your budget range".to_string(),
        };
        return PropertyResponse::ok(format!(
            "I don't have any available properties {range} right now."
        ));
    }

    let mut text = format!(
        "I found {} available properties in your budget range:\n",
        views.len()
    );
    for v in &views {
        let _ = writeln!(
            text,
            "• {} - {}/month ({} bed/{} bath)",
            v.address,
            money(v.rent),
            v.beds,
            v.full_baths
        );
    }

    PropertyResponse::ok(text).with_data(ResponseData::Listings { properties: views })
}

/// `$1500` for whole amounts, `$1500.50` otherwise.
fn money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}
