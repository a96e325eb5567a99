//! Copilot 端到端流程测试：发送消息、并发拒绝、Computer-Use 触发、护理团队

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ron_ai::agents::{mock, AgentCategory, AgentStatus};
    use ron_ai::config::AppConfig;
    use ron_ai::transcript::Role;
    use ron_ai::{AppError, Copilot};
    use tokio_util::sync::CancellationToken;

    fn copilot() -> Copilot {
        Copilot::new(&AppConfig::default(), CancellationToken::new())
    }

    #[tokio::test(start_paused = true)]
    async fn test_humira_message_gets_canned_reply() {
        let c = copilot();
        let reply = c
            .submit("Can I get help paying for Humira?")
            .await
            .unwrap();
        assert_eq!(reply.map(|m| m.content), Some(mock::HUMIRA_RESPONSE.to_string()));

        let state = c.state();
        let messages = state.transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].content, mock::HUMIRA_RESPONSE);
        assert!(!state.hero_visible);
        assert!(!state.processing);
        assert_eq!(state.status, AgentStatus::Completed);
        assert!(state.agent_data.medication.is_none());
        // 不含浏览触发词
        assert!(!state.computer_agent.is_active);
    }

    #[tokio::test(start_paused = true)]
    async fn test_browse_trigger_opens_research_session() {
        let c = copilot();
        c.submit("Please research the best rheumatologist").await.unwrap();

        let state = c.state();
        assert!(state.computer_agent.is_active);
        assert_eq!(
            state.computer_agent.current_task.as_deref(),
            Some("Researching: Please research the best rheumatologist")
        );
        assert_eq!(state.computer_agent.live_url.as_deref(), Some("https://ron-ai.io"));
        assert_eq!(
            state.current_agent.map(|a| a.category),
            Some(AgentCategory::ProviderSearch)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_submit_is_rejected() {
        let c = Arc::new(copilot());
        let mut rx = c.subscribe();

        let first = {
            let c = Arc::clone(&c);
            tokio::spawn(async move { c.submit("find a cardiologist").await })
        };
        rx.wait_for(|s| s.processing).await.unwrap();

        assert_eq!(c.submit("book an appointment").await, Err(AppError::Busy));
        let during = c.state();
        assert_eq!(during.transcript.len(), 1);
        assert_eq!(during.notice.as_deref(), Some("A request is already in flight"));

        assert_eq!(first.await.unwrap(), Ok(None));
        let after = c.state();
        assert!(!after.processing);
        assert!(after.agent_data.provider_search.is_some());
        assert!(after.agent_data.appointment.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_locked_while_request_in_flight() {
        let c = Arc::new(copilot());
        let mut rx = c.subscribe();

        let first = {
            let c = Arc::clone(&c);
            tokio::spawn(async move { c.submit("find a doctor").await })
        };
        rx.wait_for(|s| s.processing).await.unwrap();

        assert!(c.state().input_locked());
        assert!(!c.set_input("my next question"));

        first.await.unwrap().unwrap();
        let state = c.state();
        assert!(!state.input_locked());
        assert!(state.input.value.is_empty());
        assert!(c.set_input("my next question"));
        assert_eq!(c.state().input.value, "my next question");
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_then_add_result_to_care_team() {
        let c = copilot();
        assert_eq!(
            c.add_result_to_care_team("2"),
            Err(AppError::UnknownProvider("2".to_string()))
        );

        c.submit("find a dermatologist").await.unwrap();
        assert_eq!(c.add_result_to_care_team("2"), Ok(true));
        assert_eq!(c.add_result_to_care_team("2"), Ok(false));

        let team = c.state().care_team;
        assert_eq!(team.len(), 1);
        assert!(team.contains("2"));

        assert!(c.remove_from_care_team("2"));
        assert!(c.state().care_team.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_search_replaces_results() {
        let c = copilot();
        c.submit("find a doctor").await.unwrap();
        c.submit("find a specialist nearby").await.unwrap();

        let search = c.state().agent_data.provider_search.unwrap();
        assert_eq!(search.search_query, "find a specialist nearby");
        assert_eq!(search.results.len(), mock::providers().len());
    }
}
