#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::dashboard::overview::{EmotionDashboard, JournalActivity};
    use crate::domain::dashboard::test_support::{record_on, scores};
    use crate::domain::dashboard::{DashboardPeriod, Trend};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_empty_dashboard_is_renderable() {
        let period = DashboardPeriod::ending_on(day(30), 30).unwrap();
        let dashboard = EmotionDashboard::compute(period, &[], &JournalActivity::default());

        assert_eq!(dashboard.mood_improvement.trend, Trend::Neutral);
        assert_eq!(dashboard.mood_journey.statistics.average_mood, 3.0);
        assert_eq!(dashboard.emotional_landscape.dominant_emotion, "Neutral");
        assert_eq!(dashboard.progress.mood_stability.percentage, 85.0);
        assert_eq!(dashboard.progress.journaling_streak.current_days, 0);
        assert_eq!(dashboard.journal_entries.total_period, 0);
    }

    #[test]
    fn test_records_outside_window_are_ignored() {
        let period = DashboardPeriod::ending_on(day(20), 7).unwrap();
        let series = vec![
            record_on(2, scores([0, 0, 0, 0, 10, 0, 0])),
            record_on(15, scores([8, 0, 0, 0, 0, 0, 2])),
        ];

        let dashboard = EmotionDashboard::compute(period, &series, &JournalActivity::default());
        assert_eq!(dashboard.mood_journey.daily_moods.len(), 1);
        assert_eq!(dashboard.mood_journey.daily_moods[0].date, day(15));
    }

    #[test]
    fn test_unsorted_series_is_ordered_by_date() {
        let period = DashboardPeriod::ending_on(day(10), 10).unwrap();
        let series = vec![
            record_on(9, scores([5, 1, 0, 0, 0, 0, 0])),
            record_on(1, scores([1, 5, 0, 0, 0, 0, 0])),
        ];

        let dashboard = EmotionDashboard::compute(period, &series, &JournalActivity::default());
        assert_eq!(dashboard.mood_journey.daily_moods[0].date, day(1));
        assert_eq!(dashboard.mood_improvement.trend, Trend::Improving);
    }

    #[test]
    fn test_activity_feeds_streak_and_counts() {
        let period = DashboardPeriod::ending_on(day(20), 14).unwrap();
        let activity = JournalActivity {
            recent_entry_dates: vec![day(20), day(19), day(17)],
            entries_this_week: 3,
            entries_in_period: 6,
        };

        let dashboard = EmotionDashboard::compute(period, &[], &activity);
        assert_eq!(dashboard.progress.journaling_streak.current_days, 2);
        assert_eq!(dashboard.progress.total_entries, 6);
        assert_eq!(dashboard.journal_entries.this_week, 3);
        assert_eq!(dashboard.journal_entries.average_per_week, 3.0);
    }

    #[test]
    fn test_dashboard_serializes_all_groups() {
        let period = DashboardPeriod::ending_on(day(5), 5).unwrap();
        let dashboard = EmotionDashboard::compute(
            period,
            &[record_on(5, scores([3, 0, 0, 0, 0, 0, 1]))],
            &JournalActivity::default(),
        );

        let json = serde_json::to_value(&dashboard).unwrap();
        for key in [
            "mood_improvement",
            "mood_journey",
            "emotional_landscape",
            "progress",
            "journal_entries",
            "period",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["mood_improvement"]["trend"], "neutral");
        assert_eq!(json["progress"]["mood_stability"]["status"], "excellent");
    }
}
