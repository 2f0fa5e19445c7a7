//! Demo workspace content.
//!
//! Five notebooks (two roots) and four notes, used by the CLI and by the
//! in-memory collaborators when no server is configured.

use crate::model::note::Note;
use crate::model::notebook::Notebook;

/// 2024-01-01T00:00:00Z.
const JAN_1_2024_MS: i64 = 1_704_067_200_000;
const DAY_MS: i64 = 86_400_000;

const DAILY_JOURNAL: &str = "# Daily Journal

## Today's Goals
- Complete the AI notebook app
- Review project requirements
- Plan next sprint

## Thoughts
Today was productive. The new notebook app is coming along well. The hierarchical structure makes it easy to organize thoughts and projects.

## Tomorrow
- Add more AI features
- Improve the search functionality
- Test with real data";

const PROJECT_PLANNING: &str = "# Project Planning

## Overview
This project aims to create a modern AI-powered notebook application with the following features:

- Hierarchical notebook organization
- Markdown editing with live preview
- Semantic search capabilities
- AI chat integration
- Clean, minimalist design

## Technical Stack
- React with TypeScript
- Tailwind CSS for styling
- AI SDK for AI features
- Markdown rendering

## Next Steps
1. Implement core functionality
2. Add AI features
3. Polish the UI/UX
4. Testing and optimization";

const TEAM_MEETING: &str = "# Team Meeting - January 12, 2024

## Attendees
- John Smith (PM)
- Sarah Johnson (Designer)
- Mike Chen (Developer)
- Lisa Wang (QA)

## Agenda
1. Sprint review
2. Upcoming deadlines
3. Resource allocation
4. Blockers and concerns

## Action Items
- [ ] Update project timeline
- [ ] Schedule design review
- [ ] Prepare demo for stakeholders
- [ ] Address performance issues

## Notes
The team is making good progress on the current sprint. We need to focus on the AI integration features next week.";

const APP_IDEAS: &str = "# App Ideas

## AI-Powered Tools
- Smart note-taking app \u{2705} (in progress)
- Code review assistant
- Meeting summarizer
- Personal knowledge base

## Productivity Apps
- Time tracking with insights
- Habit tracker with AI coaching
- Smart calendar assistant
- Focus timer with ambient sounds

## Creative Tools
- Story writing assistant
- Music composition helper
- Art inspiration generator
- Photography workflow manager

## Notes
The AI notebook app is our current focus. Once completed, we can explore other ideas on this list.";

fn january_2024(day: i64) -> i64 {
    JAN_1_2024_MS + (day - 1) * DAY_MS
}

/// Demo notebooks: Personal > Ideas, Work > {Projects, Meeting Notes}.
pub fn demo_notebooks() -> Vec<Notebook> {
    [
        ("notebook-1", "Personal", None, 1),
        ("notebook-2", "Work", None, 2),
        ("notebook-3", "Projects", Some("notebook-2"), 3),
        ("notebook-4", "Meeting Notes", Some("notebook-2"), 4),
        ("notebook-5", "Ideas", Some("notebook-1"), 5),
    ]
    .into_iter()
    .map(|(id, name, parent_id, day)| {
        Notebook::new(id, name, parent_id.map(str::to_string), january_2024(day))
    })
    .collect()
}

/// Demo notes, one per leaf notebook plus one in Personal.
pub fn demo_notes() -> Vec<Note> {
    [
        ("note-1", "notebook-1", "Daily Journal", DAILY_JOURNAL, 10),
        ("note-2", "notebook-3", "Project Planning", PROJECT_PLANNING, 11),
        ("note-3", "notebook-4", "Team Meeting - Jan 12", TEAM_MEETING, 12),
        ("note-4", "notebook-5", "App Ideas", APP_IDEAS, 13),
    ]
    .into_iter()
    .map(|(id, notebook_id, title, content, day)| {
        Note::with_id(id, notebook_id, title, content, january_2024(day))
    })
    .collect()
}
