//! Supplementary-system cleansing: demographics, locations, categories.

use chrono::NaiveDate;
use dwh_model::{
    COUNTRY_NOT_AVAILABLE, Entity, ErpCategory, ErpCategoryRaw, ErpCustomer, ErpCustomerRaw,
    ErpLocation, ErpLocationRaw, Gender,
};

use crate::dedupe::keep_max_by_key;
use crate::error::{CleanseError, Result};
use crate::report::{CleanTable, CleanseReport};
use crate::values::{clean_text, non_blank, parse_date};

/// Prefixes the supplementary system adds in front of the customer number.
pub const CUSTOMER_ID_PREFIXES: &[&str] = &["NAS"];

/// Country abbreviations expanded to their canonical names.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("DE", "Germany"),
    ("US", "United States"),
    ("USA", "United States"),
    ("UK", "United Kingdom"),
    ("GB", "United Kingdom"),
    ("FR", "France"),
    ("CA", "Canada"),
    ("AU", "Australia"),
];

/// Aligns a supplementary customer id with the primary customer number:
/// known system prefixes are stripped.
pub fn align_customer_number(raw: &str) -> Option<String> {
    let trimmed = non_blank(raw)?;
    let stripped = CUSTOMER_ID_PREFIXES
        .iter()
        .find_map(|prefix| {
            trimmed
                .get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &trimmed[prefix.len()..])
        })
        .unwrap_or(trimmed);
    non_blank(stripped).map(str::to_string)
}

/// Aligns a location customer id with the primary customer number:
/// separators are removed.
pub fn align_location_number(raw: &str) -> Option<String> {
    let compact: String = raw.trim().chars().filter(|ch| *ch != '-').collect();
    non_blank(&compact).map(str::to_string)
}

/// Canonical country name; blank becomes the `n/a` sentinel.
pub fn normalize_country(raw: &str) -> String {
    let Some(trimmed) = non_blank(raw) else {
        return COUNTRY_NOT_AVAILABLE.to_string();
    };
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| trimmed.to_string(), |(_, name)| (*name).to_string())
}

/// Cleans demographics. Birth dates after `as_of` are nulled.
pub fn clean_erp_customers(raw: &[ErpCustomerRaw], as_of: NaiveDate) -> CleanTable<ErpCustomer> {
    let mut report = CleanseReport::new(Entity::ErpCustomer, raw.len());
    let mut parsed = Vec::with_capacity(raw.len());
    for (idx, row) in raw.iter().enumerate() {
        let Some(customer_number) = align_customer_number(&row.cid) else {
            report.rejected.push(CleanseError::MissingBusinessKey {
                entity: Entity::ErpCustomer,
                row: idx + 1,
                column: "CID",
            });
            continue;
        };
        let parsed_date = parse_date(&row.bdate);
        let birth_date = parsed_date.filter(|date| *date <= as_of);
        let repaired = parsed_date.is_some() && birth_date.is_none();
        let customer = ErpCustomer {
            customer_number,
            birth_date,
            gender: Gender::from_code(Some(&row.gender)),
        };
        parsed.push((customer, repaired));
    }

    // The repair flag takes part in the rank so equal rows still resolve
    // to one survivor regardless of order.
    let (survivors, dropped) = keep_max_by_key(
        parsed,
        |(customer, _)| customer.customer_number.clone(),
        |a, b| a.cmp(b),
    );
    report.duplicates_dropped = dropped;
    report.repaired = survivors.iter().filter(|(_, repaired)| *repaired).count();
    let rows: Vec<ErpCustomer> = survivors.into_iter().map(|(customer, _)| customer).collect();
    report.output_rows = rows.len();
    CleanTable { rows, report }
}

fn clean_location(row: usize, raw: &ErpLocationRaw) -> Result<ErpLocation> {
    let customer_number =
        align_location_number(&raw.cid).ok_or(CleanseError::MissingBusinessKey {
            entity: Entity::ErpLocation,
            row,
            column: "CID",
        })?;
    Ok(ErpLocation {
        customer_number,
        country: normalize_country(&raw.cntry),
    })
}

/// Cleans locations. A known country is preferred over `n/a` among
/// duplicates.
pub fn clean_erp_locations(raw: &[ErpLocationRaw]) -> CleanTable<ErpLocation> {
    let mut report = CleanseReport::new(Entity::ErpLocation, raw.len());
    let mut parsed = Vec::with_capacity(raw.len());
    for (idx, row) in raw.iter().enumerate() {
        match clean_location(idx + 1, row) {
            Ok(location) => parsed.push(location),
            Err(err) => report.rejected.push(err),
        }
    }

    let (rows, dropped) = keep_max_by_key(
        parsed,
        |location| location.customer_number.clone(),
        |a, b| {
            let known_a = a.country != COUNTRY_NOT_AVAILABLE;
            let known_b = b.country != COUNTRY_NOT_AVAILABLE;
            known_a.cmp(&known_b).then_with(|| a.cmp(b))
        },
    );
    report.duplicates_dropped = dropped;
    report.repaired = rows
        .iter()
        .filter(|location| location.country == COUNTRY_NOT_AVAILABLE)
        .count();
    report.output_rows = rows.len();
    CleanTable { rows, report }
}

/// Cleans the category lookup: trimming only.
pub fn clean_erp_categories(raw: &[ErpCategoryRaw]) -> CleanTable<ErpCategory> {
    let mut report = CleanseReport::new(Entity::ErpCategory, raw.len());
    let mut parsed = Vec::with_capacity(raw.len());
    for (idx, row) in raw.iter().enumerate() {
        let Some(id) = clean_text(&row.id) else {
            report.rejected.push(CleanseError::MissingBusinessKey {
                entity: Entity::ErpCategory,
                row: idx + 1,
                column: "ID",
            });
            continue;
        };
        parsed.push(ErpCategory {
            id,
            category: clean_text(&row.cat),
            subcategory: clean_text(&row.subcat),
            maintenance: clean_text(&row.maintenance),
        });
    }

    let (rows, dropped) = keep_max_by_key(parsed, |category| category.id.clone(), |a, b| a.cmp(b));
    report.duplicates_dropped = dropped;
    report.output_rows = rows.len();
    CleanTable { rows, report }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn strips_system_prefix() {
        assert_eq!(
            align_customer_number("NASAW00011000").as_deref(),
            Some("AW00011000")
        );
        assert_eq!(
            align_customer_number("nasAW00011000").as_deref(),
            Some("AW00011000")
        );
        assert_eq!(
            align_customer_number(" AW00011001 ").as_deref(),
            Some("AW00011001")
        );
        assert_eq!(align_customer_number("NAS"), None);
        assert_eq!(align_customer_number(""), None);
    }

    #[test]
    fn removes_location_separators() {
        assert_eq!(
            align_location_number("AW-00011000").as_deref(),
            Some("AW00011000")
        );
        assert_eq!(align_location_number("-"), None);
    }

    #[test]
    fn normalizes_countries() {
        assert_eq!(normalize_country("DE"), "Germany");
        assert_eq!(normalize_country(" usa "), "United States");
        assert_eq!(normalize_country("US"), "United States");
        assert_eq!(normalize_country(" Australia"), "Australia");
        assert_eq!(normalize_country(""), "n/a");
        assert_eq!(normalize_country("   "), "n/a");
    }

    #[test]
    fn nulls_future_birthdates() {
        let rows = vec![
            ErpCustomerRaw {
                cid: "NASAW00011000".to_string(),
                bdate: "1971-10-06".to_string(),
                gender: "Male".to_string(),
            },
            ErpCustomerRaw {
                cid: "AW00011001".to_string(),
                bdate: "2050-01-01".to_string(),
                gender: " F".to_string(),
            },
        ];
        let table = clean_erp_customers(&rows, as_of());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].birth_date, NaiveDate::from_ymd_opt(1971, 10, 6));
        assert_eq!(table.rows[0].gender, Gender::Male);
        assert_eq!(table.rows[1].birth_date, None);
        assert_eq!(table.rows[1].gender, Gender::Female);
        assert_eq!(table.report.repaired, 1);
    }

    #[test]
    fn repairs_count_surviving_rows_only() {
        let rows: Vec<ErpCustomerRaw> = ["2050-01-01", "2051-06-15", "2052-12-31"]
            .into_iter()
            .map(|bdate| ErpCustomerRaw {
                cid: "AW00011001".to_string(),
                bdate: bdate.to_string(),
                gender: "F".to_string(),
            })
            .collect();
        let table = clean_erp_customers(&rows, as_of());
        assert_eq!(table.report.output_rows, 1);
        assert_eq!(table.report.duplicates_dropped, 2);
        assert_eq!(table.report.repaired, 1);
        assert_eq!(table.rows[0].birth_date, None);
    }

    #[test]
    fn rejects_blank_erp_ids() {
        let rows = vec![ErpCustomerRaw {
            cid: " ".to_string(),
            bdate: "1971-10-06".to_string(),
            gender: "M".to_string(),
        }];
        let table = clean_erp_customers(&rows, as_of());
        assert!(table.rows.is_empty());
        assert_eq!(table.report.rejected_count(), 1);
    }

    #[test]
    fn location_prefers_known_country() {
        let rows = vec![
            ErpLocationRaw {
                cid: "AW-00011000".to_string(),
                cntry: "Australia".to_string(),
            },
            ErpLocationRaw {
                cid: "AW-00011000".to_string(),
                cntry: "".to_string(),
            },
        ];
        let table = clean_erp_locations(&rows);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].country, "Australia");
    }

    #[test]
    fn categories_are_trimmed() {
        let rows = vec![ErpCategoryRaw {
            id: " CO_RF ".to_string(),
            cat: "Components ".to_string(),
            subcat: " Road Frames".to_string(),
            maintenance: "".to_string(),
        }];
        let table = clean_erp_categories(&rows);
        assert_eq!(table.rows[0].id, "CO_RF");
        assert_eq!(table.rows[0].category.as_deref(), Some("Components"));
        assert_eq!(table.rows[0].subcategory.as_deref(), Some("Road Frames"));
        assert_eq!(table.rows[0].maintenance, None);
    }
}
