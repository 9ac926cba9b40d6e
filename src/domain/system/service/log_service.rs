use validator::Validate;

use crate::api::dto::system_dto::{LogQuery, PaginatedLogResponse};
use crate::core::persistence::logs::log_repository::LogRepository;

const DEFAULT_PAGE_SIZE: usize = 500;

/// Read access to the gateway's daily log files.
pub struct LogService<R: LogRepository> {
    repo: R,
}

impl<R: LogRepository> LogService<R> {
    pub fn new(repo: R) -> Self {
        LogService { repo }
    }

    pub async fn get_system_log_file_list(&self) -> anyhow::Result<Vec<String>> {
        self.repo.get_logs()
    }

    pub async fn get_system_log_lines(
        &self,
        date: String,
        query: LogQuery,
    ) -> anyhow::Result<PaginatedLogResponse> {
        query.validate()?;

        let lines = self.repo.get_log(&date)?;
        let cursor = query.cursor.unwrap_or(0);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        let page: Vec<String> = lines.iter().skip(cursor).take(limit).cloned().collect();
        let consumed = cursor + page.len();
        let next_cursor = (consumed < lines.len()).then_some(consumed);

        Ok(PaginatedLogResponse {
            date,
            lines: page,
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct MockLogRepository {
        lines: Vec<String>,
    }

    impl LogRepository for MockLogRepository {
        fn get_logs(&self) -> Result<Vec<String>> {
            Ok(vec!["2026-08-07".into(), "2026-08-06".into()])
        }

        fn get_log(&self, _date: &str) -> Result<Vec<String>> {
            Ok(self.lines.clone())
        }
    }

    fn service_with_lines(n: usize) -> LogService<MockLogRepository> {
        let lines = (0..n).map(|i| format!("line {i}")).collect();
        LogService::new(MockLogRepository { lines })
    }

    #[tokio::test]
    async fn lists_available_log_dates() {
        let service = service_with_lines(0);
        let dates = service.get_system_log_file_list().await.unwrap();
        assert_eq!(dates, vec!["2026-08-07", "2026-08-06"]);
    }

    #[tokio::test]
    async fn pages_through_lines_with_cursor_and_limit() {
        let service = service_with_lines(5);

        let page = service
            .get_system_log_lines(
                "2026-08-07".into(),
                LogQuery { cursor: Some(2), limit: Some(2) },
            )
            .await
            .unwrap();

        assert_eq!(page.lines, vec!["line 2", "line 3"]);
        assert_eq!(page.next_cursor, Some(4));

        let last = service
            .get_system_log_lines(
                "2026-08-07".into(),
                LogQuery { cursor: Some(4), limit: Some(2) },
            )
            .await
            .unwrap();

        assert_eq!(last.lines, vec!["line 4"]);
        assert_eq!(last.next_cursor, None);
    }

    #[tokio::test]
    async fn rejects_out_of_range_limit() {
        let service = service_with_lines(5);

        let result = service
            .get_system_log_lines(
                "2026-08-07".into(),
                LogQuery { cursor: None, limit: Some(0) },
            )
            .await;

        assert!(result.is_err());
    }
}
