//! Declarable revenue per beneficiary and the simplified contribution split.

use gites_domain::{BeneficiaryShare, PeriodSelector, PropertyDataset, ReportRules, TaxSplit, UrssafSplit};

use crate::filter::filter_by_period;

pub struct UrssafService;

impl UrssafService {
    /// Revenue each beneficiary must declare for the period.
    ///
    /// Only channels listed in `rules.declarable_channels` count, compared
    /// exactly (case and accents included), unlike the normalised matching
    /// used by the payment groups.
    pub fn urssaf_split(
        dataset: &PropertyDataset,
        period: PeriodSelector,
        rules: &ReportRules,
    ) -> UrssafSplit {
        let shares = rules
            .beneficiaries
            .iter()
            .map(|beneficiary| {
                let revenue: f64 = beneficiary
                    .properties
                    .iter()
                    .flat_map(|property| filter_by_period(dataset.records(property), period, rules))
                    .filter(|record| rules.is_declarable(&record.payment_channel))
                    .map(|record| record.revenue)
                    .sum();
                BeneficiaryShare {
                    beneficiary: beneficiary.name.clone(),
                    revenue,
                }
            })
            .collect();
        UrssafSplit { shares }
    }

    /// Simplified contribution estimate on a gross revenue figure.
    pub fn tax_split(gross: f64, rules: &ReportRules) -> TaxSplit {
        TaxSplit {
            gross,
            contribution: gross * rules.tax.contribution_rate,
            net: gross * rules.tax.net_rate,
        }
    }
}
