//! Fare comparison across the schemes that apply to a vehicle class

use serde::{Deserialize, Serialize};
use tracing::debug;
use unchin_types::{ComparisonError, FareScheme, TruckTier, VehicleClass, Yen};

use crate::model::FareRequest;
use crate::repository::RateLookup;
use crate::service::akabou_fare::{
    AdditionalFeesResult, AkabouDistanceFareResult, AkabouFareService, AkabouTimeFareResult,
};
use crate::service::distance_fare::{DistanceFareResult, DistanceFareService};
use crate::service::time_fare::{AllowanceMode, TimeFareInput, TimeFareResult, TimeFareService};

/// Official tariff results for a truck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckResults {
    pub distance: DistanceFareResult,
    pub time: TimeFareResult,
}

/// Akabou results; ranking totals include the ancillary fees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AkabouResults {
    pub distance: AkabouDistanceFareResult,
    pub time: AkabouTimeFareResult,
    pub additional_fees: AdditionalFeesResult,
}

impl AkabouResults {
    pub fn distance_total(&self) -> Yen {
        self.distance.total_fare().saturating_add(self.additional_fees.total_fee)
    }

    pub fn time_total(&self) -> Yen {
        self.time.total_fare().saturating_add(self.additional_fees.total_fee)
    }
}

/// Exactly one family of results per comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemeResults {
    Truck(TruckResults),
    Akabou(AkabouResults),
}

impl SchemeResults {
    /// (scheme, fare) in evaluation order, distance before time
    fn totals(&self) -> [(FareScheme, Yen); 2] {
        match self {
            SchemeResults::Truck(r) => [
                (FareScheme::Distance, r.distance.total_fare()),
                (FareScheme::Time, r.time.total_fare()),
            ],
            SchemeResults::Akabou(r) => [
                (FareScheme::AkabouDistance, r.distance_total()),
                (FareScheme::AkabouTime, r.time_total()),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRanking {
    /// 1 is the cheapest
    pub rank: usize,
    pub scheme: FareScheme,
    pub fare: Yen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareComparisonResult {
    pub request: FareRequest,
    pub results: SchemeResults,
    /// Ascending by fare
    pub rankings: Vec<FareRanking>,
    pub cheapest: FareRanking,
}

impl FareComparisonResult {
    pub fn cheapest_scheme(&self) -> FareScheme {
        self.cheapest.scheme
    }

    pub fn cheapest_fare(&self) -> Yen {
        self.cheapest.fare
    }

    pub fn truck(&self) -> Option<&TruckResults> {
        match &self.results {
            SchemeResults::Truck(r) => Some(r),
            SchemeResults::Akabou(_) => None,
        }
    }

    pub fn akabou(&self) -> Option<&AkabouResults> {
        match &self.results {
            SchemeResults::Akabou(r) => Some(r),
            SchemeResults::Truck(_) => None,
        }
    }

    /// Ranking followed by each scheme's 計算根拠
    pub fn breakdown(&self) -> String {
        const RULE: &str = "----------------------------------------\n";
        let mut report = String::from("========================================\n");
        report.push_str("【運賃比較結果】\n");
        report.push_str("========================================\n\n");

        report.push_str("【ランキング】\n");
        for ranking in &self.rankings {
            let marker = if ranking.rank == 1 { " ← 最安" } else { "" };
            report.push_str(&format!(
                "  {}位: {} {}円{}\n",
                ranking.rank,
                ranking.scheme.label(),
                ranking.fare,
                marker
            ));
        }

        let sections = match &self.results {
            SchemeResults::Truck(r) => vec![r.distance.breakdown(), r.time.breakdown()],
            SchemeResults::Akabou(r) => vec![
                r.distance.breakdown(),
                r.time.breakdown(),
                r.additional_fees.breakdown(),
            ],
        };
        for section in sections {
            report.push('\n');
            report.push_str(RULE);
            report.push_str(&section);
        }
        report
    }
}

/// Runs the applicable calculators and ranks their totals
pub struct FareCalculatorService<'a> {
    rates: &'a dyn RateLookup,
    akabou: AkabouFareService,
}

impl<'a> FareCalculatorService<'a> {
    pub fn new(rates: &'a dyn RateLookup, akabou: AkabouFareService) -> Self {
        Self { rates, akabou }
    }

    /// Uses the standard Akabou tariff
    pub fn with_standard_akabou(rates: &'a dyn RateLookup) -> Self {
        Self::new(rates, AkabouFareService::default())
    }

    pub fn compare(&self, request: &FareRequest) -> Result<FareComparisonResult, ComparisonError> {
        let results = match request.vehicle {
            VehicleClass::Light => SchemeResults::Akabou(self.akabou_results(request)?),
            VehicleClass::Truck(tier) => SchemeResults::Truck(self.truck_results(request, tier)?),
        };

        let rankings = rank(results.totals());
        let cheapest = rankings[0];
        debug!(
            scheme = %cheapest.scheme,
            fare = cheapest.fare,
            "ranked {} schemes",
            rankings.len()
        );

        Ok(FareComparisonResult {
            request: request.clone(),
            results,
            rankings,
            cheapest,
        })
    }

    fn truck_results(
        &self,
        request: &FareRequest,
        tier: TruckTier,
    ) -> Result<TruckResults, ComparisonError> {
        let flags = request.surcharge_flags();

        let distance = DistanceFareService::new(self.rates)
            .calculate(request.region, tier, request.distance_km, flags)
            .map_err(|e| ComparisonError::new(FareScheme::Distance, e))?;

        let input = TimeFareInput {
            region: request.region,
            tier,
            distance_km: request.distance_km,
            driving_minutes: request.driving_minutes,
            loading_minutes: request.loading_minutes,
            flags,
            allowance: AllowanceMode::from_simple_flag(request.use_simple_allowance),
        };
        let time = TimeFareService::new(self.rates)
            .calculate(&input)
            .map_err(|e| ComparisonError::new(FareScheme::Time, e))?;

        Ok(TruckResults { distance, time })
    }

    fn akabou_results(&self, request: &FareRequest) -> Result<AkabouResults, ComparisonError> {
        let flags = request.surcharge_flags();

        let distance = self
            .akabou
            .calculate_distance_fare(request.distance_km, flags, &request.area)
            .map_err(|e| ComparisonError::new(FareScheme::AkabouDistance, e))?;
        let time = self
            .akabou
            .calculate_time_fare(request.total_minutes(), flags, &request.area)
            .map_err(|e| ComparisonError::new(FareScheme::AkabouTime, e))?;
        let additional_fees = self
            .akabou
            .calculate_additional_fees(request.work_minutes, request.waiting_minutes);

        Ok(AkabouResults {
            distance,
            time,
            additional_fees,
        })
    }
}

/// Stable ascending sort; ties keep evaluation order
fn rank(totals: [(FareScheme, Yen); 2]) -> Vec<FareRanking> {
    let mut rankings: Vec<FareRanking> = totals
        .into_iter()
        .map(|(scheme, fare)| FareRanking {
            rank: 0,
            scheme,
            fare,
        })
        .collect();
    rankings.sort_by_key(|r| r.fare);
    for (i, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = i + 1;
    }
    rankings
}
