//! Chart.js script builders for the three dashboard charts.
//!
//! Each script first destroys whatever chart already owns its canvas, so a
//! re-render never stacks a second chart on the same element.

use citypop_pipeline::{ChartSet, GrowthPoint, PopulationPoint, ProvinceTotal};

pub const PROVINCE_CHART_ID: &str = "chart-province";
pub const GROWTH_CHART_ID: &str = "chart-growth";
pub const POPULATION_CHART_ID: &str = "chart-population";

const PROVINCE_FILL: [&str; 6] = [
    "rgba(255, 99, 132, 0.7)",
    "rgba(54, 162, 235, 0.7)",
    "rgba(255, 206, 86, 0.7)",
    "rgba(75, 192, 192, 0.7)",
    "rgba(153, 102, 255, 0.7)",
    "rgba(255, 159, 64, 0.7)",
];
const PROVINCE_BORDER: [&str; 6] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
    "rgba(255, 159, 64, 1)",
];

/// Scripts for one `ChartSet`, ready to drop into `<script>` tags.
#[derive(Clone, PartialEq, Default)]
pub struct ChartScripts {
    pub province: String,
    pub growth: String,
    pub population: String,
}

impl ChartScripts {
    pub fn build(charts: &ChartSet) -> Self {
        Self {
            province: build_province_chart(&charts.province_totals),
            growth: build_growth_chart(&charts.top_growth),
            population: build_population_chart(&charts.top_population),
        }
    }
}

/// JSON literal that is safe inside an inline `<script>`.
fn json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .replace("</", "<\\/")
}

fn destroy_existing(id: &str) -> String {
    format!("Chart.getChart('{id}')?.destroy();")
}

/// Bar chart of summed 2017 population per province.
pub fn build_province_chart(totals: &[ProvinceTotal]) -> String {
    let labels: Vec<&str> = totals.iter().map(|t| t.province.as_str()).collect();
    let values: Vec<f64> = totals.iter().map(|t| t.population_2017).collect();

    format!(
        r#"{destroy}new Chart(document.getElementById('{id}'),{{type:'bar',data:{{labels:{labels},datasets:[{{label:'Population (2017 Census)',data:{values},backgroundColor:{fill},borderColor:{border},borderWidth:1}}]}},options:{{responsive:true,plugins:{{legend:{{display:false}},tooltip:{{callbacks:{{label:(c)=>'Population: '+c.raw.toLocaleString()}}}}}},scales:{{y:{{beginAtZero:true,ticks:{{callback:(v)=>v.toLocaleString()}}}}}}}}}});"#,
        destroy = destroy_existing(PROVINCE_CHART_ID),
        id = PROVINCE_CHART_ID,
        labels = json(&labels),
        values = json(&values),
        fill = json(&PROVINCE_FILL),
        border = json(&PROVINCE_BORDER),
    )
}

/// Bar chart of the fastest-growing cities.
pub fn build_growth_chart(points: &[GrowthPoint]) -> String {
    let labels: Vec<&str> = points.iter().map(|p| p.city.as_str()).collect();
    let values: Vec<f64> = points.iter().map(|p| p.change).collect();

    format!(
        r#"{destroy}new Chart(document.getElementById('{id}'),{{type:'bar',data:{{labels:{labels},datasets:[{{label:'Population Change Rate (%)',data:{values},backgroundColor:'rgba(54, 162, 235, 0.7)',borderColor:'rgba(54, 162, 235, 1)',borderWidth:1}}]}},options:{{responsive:true,plugins:{{legend:{{display:false}}}},scales:{{y:{{beginAtZero:true,ticks:{{callback:(v)=>v+'%'}}}}}}}}}});"#,
        destroy = destroy_existing(GROWTH_CHART_ID),
        id = GROWTH_CHART_ID,
        labels = json(&labels),
        values = json(&values),
    )
}

/// Two filled lines comparing both censuses for the most populous cities.
pub fn build_population_chart(points: &[PopulationPoint]) -> String {
    let labels: Vec<&str> = points.iter().map(|p| p.city.as_str()).collect();
    let pop_2017: Vec<f64> = points.iter().map(|p| p.population_2017).collect();
    let pop_1998: Vec<f64> = points.iter().map(|p| p.population_1998).collect();

    format!(
        r#"{destroy}new Chart(document.getElementById('{id}'),{{type:'line',data:{{labels:{labels},datasets:[{{label:'Population (2017 Census)',data:{pop_2017},backgroundColor:'rgba(255, 99, 132, 0.2)',borderColor:'rgba(255, 99, 132, 1)',borderWidth:2,tension:0.1,fill:true}},{{label:'Population (1998 Census)',data:{pop_1998},backgroundColor:'rgba(54, 162, 235, 0.2)',borderColor:'rgba(54, 162, 235, 1)',borderWidth:2,tension:0.1,fill:true}}]}},options:{{responsive:true,plugins:{{tooltip:{{callbacks:{{label:(c)=>c.dataset.label+': '+c.raw.toLocaleString()}}}}}},scales:{{y:{{beginAtZero:true,ticks:{{callback:(v)=>v.toLocaleString()}}}}}}}}}});"#,
        destroy = destroy_existing(POPULATION_CHART_ID),
        id = POPULATION_CHART_ID,
        labels = json(&labels),
        pop_2017 = json(&pop_2017),
        pop_1998 = json(&pop_1998),
    )
}
