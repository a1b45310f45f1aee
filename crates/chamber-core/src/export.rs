//! CSV export for the back office, and the receipt document payload.
//!
//! CSV output follows RFC 4180: comma separated, CRLF line endings, fields
//! quoted only when they contain a comma, quote, CR, or LF.

use serde::Serialize;

use crate::entities::{Business, Receipt};

/// Quote a single CSV field if needed.
#[must_use]
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render a header row plus data rows.
#[must_use]
pub fn to_csv<R, F>(headers: &[&str], rows: &[R], mut cells: F) -> String
where
    F: FnMut(&R) -> Vec<String>,
{
    let mut out = String::new();
    push_line(&mut out, headers.iter().map(|h| (*h).to_string()));
    for row in rows {
        push_line(&mut out, cells(row));
    }
    out
}

fn push_line(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let line: Vec<String> = fields.into_iter().map(|f| csv_field(&f)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Businesses export used by the verification back office.
#[must_use]
pub fn businesses_csv(businesses: &[Business]) -> String {
    to_csv(
        &["id", "name", "slug", "email", "phone", "website", "address", "verified", "created_at"],
        businesses,
        |b| {
            vec![
                b.id.clone(),
                b.name.clone(),
                b.slug.clone(),
                b.email.clone().unwrap_or_default(),
                b.phone.clone().unwrap_or_default(),
                b.website.clone().unwrap_or_default(),
                b.address.clone().unwrap_or_default(),
                b.verified.to_string(),
                b.created_at.to_rfc3339(),
            ]
        },
    )
}

/// Receipts export, amounts in major units.
#[must_use]
pub fn receipts_csv(receipts: &[Receipt]) -> String {
    to_csv(
        &["number", "business_id", "amount", "payment_method", "description", "issued_at"],
        receipts,
        |r| {
            vec![
                r.number.clone(),
                r.business_id.clone(),
                r.amount_display(),
                r.payment_method.to_string(),
                r.description.clone(),
                r.issued_at.to_rfc3339(),
            ]
        },
    )
}

/// Everything a PDF renderer needs to lay out one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptDocument {
    pub organisation: String,
    pub number: String,
    pub issued_on: String,
    pub billed_to: String,
    pub description: String,
    pub payment_method: String,
    pub amount: String,
}

impl ReceiptDocument {
    #[must_use]
    pub fn new(organisation: &str, receipt: &Receipt, business: &Business) -> Self {
        Self {
            organisation: organisation.to_string(),
            number: receipt.number.clone(),
            issued_on: receipt.issued_at.format("%Y-%m-%d").to_string(),
            billed_to: business.name.clone(),
            description: receipt.description.clone(),
            payment_method: receipt.payment_method.to_string(),
            amount: receipt.amount_display(),
        }
    }

    /// Plain-text rendering for terminals and email bodies.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "{org}\nReceipt {number}\nDate: {date}\nBilled to: {to}\n\n{desc}\nPaid by {method}\nTotal: {amount}\n",
            org = self.organisation,
            number = self.number,
            date = self.issued_on,
            to = self.billed_to,
            desc = self.description,
            method = self.payment_method,
            amount = self.amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::PaymentMethod;

    fn receipt(description: &str) -> Receipt {
        Receipt {
            id: "rct-1".into(),
            number: "2026-0001".into(),
            business_id: "biz-1".into(),
            amount_cents: 12_050,
            payment_method: PaymentMethod::BankTransfer,
            description: description.into(),
            issued_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn fields_are_quoted_only_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn receipts_csv_has_header_and_rows() {
        let csv = receipts_csv(&[receipt("Membership, annual")]);
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "number,business_id,amount,payment_method,description,issued_at");
        assert_eq!(
            lines[1],
            "2026-0001,biz-1,120.50,bank_transfer,\"Membership, annual\",2026-03-01T09:00:00+00:00"
        );
        assert_eq!(lines[2], "");
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(businesses_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn receipt_document_text() {
        let now = Utc::now();
        let business = Business {
            id: "biz-1".into(),
            owner_id: "usr-1".into(),
            type_id: "typ-1".into(),
            name: "Acme Mart".into(),
            slug: "acme_mart".into(),
            description: None,
            email: None,
            phone: None,
            website: None,
            address: None,
            logo_url: None,
            verified: true,
            created_at: now,
            updated_at: now,
        };
        let doc = ReceiptDocument::new("Harbour Chamber", &receipt("Annual membership"), &business);
        let text = doc.to_text();
        assert!(text.starts_with("Harbour Chamber\nReceipt 2026-0001\nDate: 2026-03-01\n"));
        assert!(text.contains("Billed to: Acme Mart"));
        assert!(text.ends_with("Total: 120.50\n"));
    }
}
