// ABOUTME: Prompt builders for engagement and idea summaries

use std::fmt::Write;

use dayboard_core::{Engagement, Idea};

pub fn engagement_prompt(engagement: &Engagement) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Summarize the current state of this client engagement in a short paragraph. \
         Call out risks and the most recent activity."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Engagement: {}", engagement.name);
    let _ = writeln!(prompt, "Account: {}", engagement.account_name);
    let _ = writeln!(prompt, "Status: {}", engagement.status);

    let mut timeline: Vec<_> = engagement.timeline.iter().collect();
    timeline.sort_by_key(|entry| entry.date);

    if timeline.is_empty() {
        let _ = writeln!(prompt, "Timeline: (no entries)");
    } else {
        let _ = writeln!(prompt, "Timeline:");
        for entry in timeline {
            let _ = writeln!(prompt, "- {} [{}] {}", entry.date, entry.kind, entry.content);
        }
    }

    prompt
}

pub fn idea_prompt(idea: &Idea) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Summarize this idea in two or three sentences and suggest a next step."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Title: {}", idea.title);
    if !idea.category.is_empty() {
        let _ = writeln!(prompt, "Category: {}", idea.category);
    }
    let _ = writeln!(prompt, "Priority: {}", idea.priority);
    let _ = writeln!(prompt, "Status: {}", idea.status);

    if idea.entries.is_empty() {
        let _ = writeln!(prompt, "Notes: {}", idea.description);
    } else {
        let _ = writeln!(prompt, "Notes:");
        for entry in &idea.entries {
            let _ = writeln!(prompt, "- {}", entry.content);
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayboard_core::{TimelineEntry, TimelineEntryType};

    #[test]
    fn test_engagement_prompt_orders_timeline() {
        let mut engagement = Engagement::new_with_seed("E-1", "org", "Acme", "Rollout", "Kickoff");
        engagement.timeline.insert(
            0,
            TimelineEntry {
                id: "tl-late".into(),
                date: engagement.timeline[0].date + chrono::Duration::days(3),
                content: "Go-live".into(),
                kind: TimelineEntryType::Milestone,
            },
        );

        let prompt = engagement_prompt(&engagement);
        let kickoff = prompt.find("Kickoff").unwrap();
        let go_live = prompt.find("Go-live").unwrap();
        assert!(kickoff < go_live);
        assert!(prompt.contains("Account: Acme"));
        assert!(prompt.contains("[milestone]"));
    }

    #[test]
    fn test_idea_prompt_falls_back_to_description() {
        let idea: Idea = serde_json::from_value(serde_json::json!({
            "id": "idea-1",
            "title": "Status bot",
            "description": "Post weekly status"
        }))
        .unwrap();

        let prompt = idea_prompt(&idea);
        assert!(prompt.contains("Title: Status bot"));
        assert!(prompt.contains("Notes: Post weekly status"));
        assert!(prompt.contains("Priority: Medium"));
    }
}
