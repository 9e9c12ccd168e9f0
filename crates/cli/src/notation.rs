use anyhow::{anyhow, bail, Context};
use cardstrike_core::{Card, Modifier, Rank, Suit};

/// Parse one card token such as `AS`, `10H`, `JK`, `8D*` or `QC+4`.
pub fn parse_card(token: &str) -> anyhow::Result<Card> {
    let mut body = token.trim().to_ascii_uppercase();
    let mut chain = false;
    let mut bonus = None;
    loop {
        if let Some(rest) = body.strip_suffix('*') {
            if chain {
                bail!("card '{token}' marks chain twice");
            }
            chain = true;
            body = rest.to_string();
        } else if let Some((rest, amount)) = body.rsplit_once('+') {
            if bonus.is_some() {
                bail!("card '{token}' carries two damage bonuses");
            }
            let amount = amount
                .parse::<i64>()
                .with_context(|| format!("invalid damage bonus in '{token}'"))?;
            bonus = Some(amount);
            body = rest.to_string();
        } else {
            break;
        }
    }

    let mut card = if body == "JK" {
        Card::joker()
    } else {
        if body.len() < 2 {
            bail!("card '{token}' is too short");
        }
        let (rank, suit) = body.split_at(body.len() - 1);
        Card::standard(parse_suit(suit, token)?, parse_rank(rank, token)?)
    };
    if chain {
        card = card.with_modifier(Modifier::Chain);
    }
    if let Some(amount) = bonus {
        card = card.with_modifier(Modifier::DamageBonus(amount));
    }
    Ok(card)
}

/// Parse a list of tokens, numbering cards from `first_id` so repeated
/// ranks and suits stay distinguishable.
pub fn parse_cards(tokens: &[String], first_id: u32) -> anyhow::Result<Vec<Card>> {
    tokens
        .iter()
        .zip(first_id..)
        .map(|(token, id)| parse_card(token).map(|card| card.with_id(id)))
        .collect()
}

fn parse_rank(raw: &str, token: &str) -> anyhow::Result<Rank> {
    let rank = match raw {
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "10" | "T" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        "A" => Rank::Ace,
        _ => return Err(anyhow!("unknown rank '{raw}' in '{token}'")),
    };
    Ok(rank)
}

fn parse_suit(raw: &str, token: &str) -> anyhow::Result<Suit> {
    let suit = match raw {
        "H" => Suit::Hearts,
        "D" => Suit::Diamonds,
        "C" => Suit::Clubs,
        "S" => Suit::Spades,
        _ => return Err(anyhow!("unknown suit '{raw}' in '{token}'")),
    };
    Ok(suit)
}

fn suit_short(suit: Suit) -> &'static str {
    match suit {
        Suit::Hearts => "H",
        Suit::Diamonds => "D",
        Suit::Clubs => "C",
        Suit::Spades => "S",
        Suit::Wild => "",
    }
}

pub fn format_card(card: &Card) -> String {
    let mut out = if card.rank == Rank::Joker {
        "JK".to_string()
    } else {
        format!("{}{}", card.rank.symbol(), suit_short(card.suit))
    };
    if card.is_chain() {
        out.push('*');
    }
    if card.damage_bonus != 0 {
        out.push_str(&format!("{:+}", card.damage_bonus));
    }
    out
}

pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}
