//! The referrals table (`?action=viewreferrals`).

use chrono::NaiveDate;
use scraper::Html;

use super::{find, find_in_document, selector, text_of};
use crate::error::{TremorError, TremorResult};
use crate::types::{Referral, ReferralDate};

/// Format of the join and last-login cells, e.g. `Jan 05 2019`.
pub const DATE_FORMAT: &str = "%b %d %Y";

/// Cell content for an event that never happened.
pub const NEVER: &str = "-";

/// Parse a date cell, mapping the lone dash to [`ReferralDate::Never`].
pub fn parse_referral_date(cell: &str) -> TremorResult<ReferralDate> {
    if cell == NEVER {
        return Ok(ReferralDate::Never);
    }
    NaiveDate::parse_from_str(cell, DATE_FORMAT)
        .map(ReferralDate::On)
        .map_err(|_| TremorError::InvalidDate {
            input: cell.to_string(),
            format: DATE_FORMAT,
        })
}

/// Parse every referral row, in table order.
pub fn parse_referrals(html: &str) -> TremorResult<Vec<Referral>> {
    let document = Html::parse_document(html);
    let table = find_in_document(&document, "table#reftable", "referral table")?;
    let tbody = find(table, "tbody", "referral table body")?;

    let row_sel = selector("tr");
    let cell_sel = selector("td");

    let mut referrals = Vec::new();
    for row in tbody.select(&row_sel) {
        // Leading cell is the row number.
        let cells: Vec<String> = row.select(&cell_sel).skip(1).map(text_of).collect();
        let [username, coins, joined, last_login] = cells.as_slice() else {
            return Err(TremorError::StructureNotFound("referral row cells"));
        };

        let coins_earned = coins
            .trim()
            .parse::<f64>()
            .map_err(|_| TremorError::InvalidNumber(coins.clone()))?;

        referrals.push(Referral {
            username: username.clone(),
            coins_earned,
            join_date: parse_referral_date(joined)?,
            last_login: parse_referral_date(last_login)?,
        });
    }

    tracing::debug!("parsed {} referral rows", referrals.len());
    Ok(referrals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
               <table id="reftable">
                 <thead><tr><th>#</th><th>User</th><th>Coins</th><th>Joined</th><th>Last Login</th></tr></thead>
                 <tbody>{rows}</tbody>
               </table>
               </body></html>"#
        )
    }

    #[test]
    fn test_dash_is_never() {
        assert_eq!(parse_referral_date("-").unwrap(), ReferralDate::Never);
    }

    #[test]
    fn test_date_round_trips_through_format() {
        let parsed = parse_referral_date("Jan 05 2019").unwrap();
        let date = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
        assert_eq!(parsed, ReferralDate::On(date));
        assert_eq!(date.format(DATE_FORMAT).to_string(), "Jan 05 2019");
    }

    #[test]
    fn test_malformed_date_is_error() {
        let err = parse_referral_date("yesterday").unwrap_err();
        assert!(matches!(err, TremorError::InvalidDate { .. }));
        // Only a lone dash is the sentinel.
        assert!(parse_referral_date(" - ").is_err());
    }

    #[test]
    fn test_parse_rows_in_order() {
        let html = page(
            r#"<tr><td>1</td><td>carol</td><td>12.5</td><td>Mar 14 2018</td><td>Feb 01 2020</td></tr>
               <tr><td>2</td><td>dave</td><td>0</td><td>Apr 02 2019</td><td>-</td></tr>"#,
        );

        let referrals = parse_referrals(&html).unwrap();
        assert_eq!(referrals.len(), 2);

        assert_eq!(referrals[0].username, "carol");
        assert_eq!(referrals[0].coins_earned, 12.5);
        assert_eq!(
            referrals[0].join_date,
            ReferralDate::On(NaiveDate::from_ymd_opt(2018, 3, 14).unwrap())
        );
        assert_eq!(
            referrals[0].last_login,
            ReferralDate::On(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap())
        );

        assert_eq!(referrals[1].username, "dave");
        assert_eq!(referrals[1].coins_earned, 0.0);
        assert_eq!(referrals[1].last_login, ReferralDate::Never);
    }

    #[test]
    fn test_missing_table_is_structure_error() {
        let err = parse_referrals("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, TremorError::StructureNotFound("referral table")));
    }

    #[test]
    fn test_bad_coin_amount() {
        let html = page(
            r#"<tr><td>1</td><td>erin</td><td>lots</td><td>Mar 14 2018</td><td>-</td></tr>"#,
        );
        let err = parse_referrals(&html).unwrap_err();
        assert!(matches!(err, TremorError::InvalidNumber(ref s) if s == "lots"));
    }
}
