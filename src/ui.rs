use ratatui::{prelude::*, widgets::*};

use crate::ipfs;
use crate::models::TokenCard;

/// Frames of the loading spinner, advanced once per UI tick
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncated `0x1234…abcd` form for badges and card labels
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Image URL shown on a card: gateway-normalized, rerouted to a local
/// gateway when one is configured
pub fn display_image_url(card: &TokenCard, local_gateway: Option<&str>) -> String {
    let url = card.image_url();
    match local_gateway {
        Some(gateway) => ipfs::rewrite_to_local_gateway(&url, gateway),
        None => url,
    }
}

/// Content lines of one token card in the grid
pub fn card_lines(card: &TokenCard, local_gateway: Option<&str>) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("Name:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                card.metadata.display_title().to_string(),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Token: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!(
                "{} #{}",
                short_address(&card.token.contract.address),
                card.token.id.token_id
            )),
        ]),
        Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                display_image_url(card, local_gateway),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OwnedToken, RawMetadata, TokenMetadata};

    #[test]
    fn short_address_keeps_head_and_tail() {
        assert_eq!(
            short_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            "0xd8dA…6045"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
    }

    #[test]
    fn spinner_wraps_around() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
    }

    #[test]
    fn card_image_prefers_the_local_gateway() {
        let card = TokenCard {
            token: OwnedToken::new("0xabc", "0x1"),
            metadata: TokenMetadata {
                title: String::new(),
                raw: RawMetadata {
                    image: Some("ipfs://Qm".into()),
                    ..Default::default()
                },
            },
        };

        assert_eq!(
            display_image_url(&card, None),
            "https://gateway.pinata.cloud/ipfs/Qm"
        );
        assert_eq!(
            display_image_url(&card, Some("http://127.0.0.1:8080")),
            "http://127.0.0.1:8080/Qm"
        );
    }
}
