use campus_energy_shared::OverviewStatistics;
use campus_energy_shared::protocol::Endpoint;

/// 首页概览
pub fn overview() -> Endpoint<OverviewStatistics> {
    Endpoint::get("/statistics/overview")
}
