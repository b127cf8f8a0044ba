use std::sync::Arc;
use tracing::{error, info, warn};

use super::ServiceError;
use crate::api::DashboardApi;
use crate::clock::Clock;
use crate::page::{targets, Page};
use crate::render;
use covered_call_common::{
    validate_date_range, BacktestRequest, BacktestResult, DateRange, ValidationError,
};

/// Raw values of the backtest form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BacktestForm {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    pub option_type: String,
    pub deviation: String,
    pub stop_loss: String,
}

impl BacktestForm {
    fn into_request(self, range: DateRange) -> BacktestRequest {
        BacktestRequest {
            ticker: self.ticker,
            start_date: range.start_raw,
            end_date: range.end_raw,
            option_type: self.option_type,
            deviation: self.deviation,
            stop_loss: self.stop_loss,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The date range failed a check; nothing was sent.
    Rejected(ValidationError),
    Rendered(BacktestResult),
}

/// Handles submissions of the backtest form.
pub struct BacktestFormController {
    api: Arc<dyn DashboardApi>,
    page: Arc<dyn Page>,
    clock: Arc<dyn Clock>,
}

impl BacktestFormController {
    pub fn new(api: Arc<dyn DashboardApi>, page: Arc<dyn Page>, clock: Arc<dyn Clock>) -> Self {
        Self { api, page, clock }
    }

    /// Validate the form, then run one backtest and render it.
    ///
    /// A failed request leaves the loading indicator visible.
    pub async fn submit(&self, form: BacktestForm) -> Result<SubmitOutcome, ServiceError> {
        self.page
            .apply_all(render::backtest_reset(self.page.exists(targets::BACKTEST_CHART)));

        let today = self.clock.today();
        let range = match validate_date_range(&form.start_date, &form.end_date, today) {
            Ok(range) => range,
            Err(e) => {
                warn!("Backtest form rejected: {}", e);
                self.page.apply_all(render::validation_error(&e));
                return Ok(SubmitOutcome::Rejected(e));
            }
        };

        self.page.apply_all(render::backtest_loading());

        let request = form.into_request(range);
        info!(
            "Submitting backtest: ticker={}, {}..{}, option_type={}",
            request.ticker, request.start_date, request.end_date, request.option_type
        );

        let result = self.api.run_backtest(&request).await.map_err(|e| {
            error!("Backtest request failed: {}", e);
            e
        })?;

        if result.is_empty() {
            warn!("Backtest returned no statistics for {}..{}", request.start_date, request.end_date);
        } else {
            info!(
                "Backtest completed: {} trades, {} profit points",
                result.total_trades.unwrap_or_default(),
                result.profit_curve.len()
            );
        }
        self.page.apply_all(render::backtest_results(&result));

        Ok(SubmitOutcome::Rendered(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::page::{DomOp, MemoryPage};
    use crate::testing::{sample_result, MockApi, Reply};
    use chrono::NaiveDate;

    const TEMPLATE: &[&str] = &[
        targets::BACKTEST_FORM,
        targets::BACKTEST_LOADING,
        targets::BACKTEST_RESULTS,
        targets::BACKTEST_CHART,
    ];

    fn setup(api: MockApi) -> (Arc<MockApi>, Arc<MemoryPage>, BacktestFormController) {
        let api = Arc::new(api);
        let page = Arc::new(MemoryPage::with_elements(TEMPLATE));
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        let controller = BacktestFormController::new(api.clone(), page.clone(), clock);
        (api, page, controller)
    }

    fn form(start: &str, end: &str) -> BacktestForm {
        BacktestForm {
            ticker: "QQQ".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            option_type: "call".to_string(),
            deviation: "2".to_string(),
            stop_loss: "200".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rejections_issue_no_request() {
        let cases = [
            ("2023-05-01", "2023-06-01", "Start date cannot be before May 10, 2023."),
            ("2024-02-01", "2024-01-01", "Start date cannot be after end date."),
            (
                "2024-01-01",
                "2024-06-02",
                "End date cannot be after today's date (2024-06-01).",
            ),
        ];

        for (start, end, message) in cases {
            let (api, page, controller) = setup(MockApi::new().with_backtest(Reply::Ok(sample_result(3))));

            let outcome = controller.submit(form(start, end)).await.unwrap();

            assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
            assert!(api.calls().is_empty());
            assert!(page.html(targets::BACKTEST_RESULTS).contains(message));
            assert!(page.html(targets::BACKTEST_RESULTS).contains("color:red"));
            assert!(!page.is_visible(targets::BACKTEST_LOADING));
        }
    }

    #[tokio::test]
    async fn test_valid_range_posts_once_and_renders() {
        let (api, page, controller) = setup(MockApi::new().with_backtest(Reply::Ok(sample_result(6))));

        let outcome = controller.submit(form("2024-01-02", "2024-05-31")).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Rendered(_)));
        assert_eq!(api.calls(), vec!["POST /api/backtest"]);

        let requests = api.backtest_requests();
        assert_eq!(
            requests[0],
            BacktestRequest {
                ticker: "QQQ".to_string(),
                start_date: "2024-01-02".to_string(),
                end_date: "2024-05-31".to_string(),
                option_type: "call".to_string(),
                deviation: "2".to_string(),
                stop_loss: "200".to_string(),
            }
        );

        let html = page.html(targets::BACKTEST_RESULTS);
        assert!(html.contains("<h3>Backtest Results</h3>"));
        assert!(html.contains("<li><strong>Total Profit:</strong> $842.75</li>"));

        let chart = page.chart(targets::BACKTEST_CHART).unwrap();
        assert_eq!(chart.data.labels, vec!["2024-03-01", "2024-03-06"]);
        assert_eq!(chart.data.datasets[0].data, vec![0.0, 200.0]);

        assert!(page.is_visible(targets::BACKTEST_CHART));
        assert!(!page.is_visible(targets::BACKTEST_LOADING));
    }

    #[tokio::test]
    async fn test_chart_point_counts_follow_curve_length() {
        for (len, expected) in [(0, 0), (1, 1), (2, 2), (40, 2)] {
            let (_, page, controller) =
                setup(MockApi::new().with_backtest(Reply::Ok(sample_result(len))));

            controller.submit(form("2024-01-02", "2024-05-31")).await.unwrap();

            let chart = page.chart(targets::BACKTEST_CHART).unwrap();
            assert_eq!(chart.point_count(), expected, "curve length {}", len);
        }
    }

    #[tokio::test]
    async fn test_empty_backend_answer_still_renders() {
        let (api, page, controller) =
            setup(MockApi::new().with_backtest(Reply::Ok(BacktestResult::default())));

        let outcome = controller.submit(form("2024-01-02", "2024-05-31")).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Rendered(BacktestResult::default()));
        assert_eq!(api.calls().len(), 1);
        let html = page.html(targets::BACKTEST_RESULTS);
        assert_eq!(html.matches("<li>").count(), 8);
        assert!(html.contains("<li><strong>Total Trades:</strong> undefined</li>"));
        assert_eq!(page.chart(targets::BACKTEST_CHART).unwrap().point_count(), 0);
        assert!(page.is_visible(targets::BACKTEST_CHART));
        assert!(!page.is_visible(targets::BACKTEST_LOADING));
    }

    #[tokio::test]
    async fn test_padded_date_is_rejected_not_sent() {
        let (api, page, controller) = setup(MockApi::new().with_backtest(Reply::Ok(sample_result(2))));

        let outcome = controller.submit(form(" 2024-01-02", "2024-05-31")).await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::InvalidDate { field: "start", .. })
        ));
        assert!(api.calls().is_empty());
        assert!(page.html(targets::BACKTEST_RESULTS).contains("color:red"));
    }

    #[tokio::test]
    async fn test_network_failure_leaves_loading_visible() {
        let (api, page, controller) = setup(MockApi::new().with_backtest(Reply::NetworkError));

        let err = controller.submit(form("2024-01-02", "2024-05-31")).await.unwrap_err();

        assert!(matches!(err, ServiceError::Api(_)));
        assert!(err.leaves_page_busy());
        assert_eq!(api.calls().len(), 1);
        assert!(page.is_visible(targets::BACKTEST_LOADING));
        assert_eq!(page.html(targets::BACKTEST_RESULTS), "");
        assert!(page.chart(targets::BACKTEST_CHART).is_none());
    }

    #[tokio::test]
    async fn test_resubmission_clears_previous_results_first() {
        let (_, page, controller) = setup(MockApi::new().with_backtest(Reply::Ok(sample_result(2))));

        controller.submit(form("2024-01-02", "2024-05-31")).await.unwrap();
        controller.submit(form("2024-02-01", "2024-01-01")).await.unwrap();

        let journal = page.journal();
        let second_start = journal.len() - 3;
        assert_eq!(journal[second_start], DomOp::clear(targets::BACKTEST_RESULTS));
        assert_eq!(journal[second_start + 1], DomOp::hide(targets::BACKTEST_CHART));
        assert!(!page.is_visible(targets::BACKTEST_CHART));
    }
}
