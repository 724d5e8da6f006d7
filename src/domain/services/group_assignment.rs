use crate::domain::models::mentorship_group::{
    GroupPlacement, MentorshipGroup, GENERAL_GROUP_ID, GENERAL_GROUP_NAME,
};
use crate::domain::models::user::User;
use crate::domain::ports::GroupIdGenerator;

/// Minimum overlap for both joining an existing group and pairing with another intern.
pub const MIN_SHARED_INTERESTS: usize = 2;
const TOP_MATCHES: usize = 2;
const FALLBACK_INTEREST_COUNT: usize = 3;
const UNNAMED_GROUP: &str = "New Mentorship Group";

/// Interests compare without ASCII case, matching the duplicate check on save.
fn holds(interests: &[String], interest: &str) -> bool {
    interests.iter().any(|i| i.eq_ignore_ascii_case(interest))
}

/// Interests of `candidate` that also appear in `other`, in the candidate's order and spelling.
pub fn shared_interests(candidate: &[String], other: &[String]) -> Vec<String> {
    candidate.iter().filter(|i| holds(other, i)).cloned().collect()
}

/// Decides which mentorship group an intern with `intern_interests` should land in.
///
/// Existing groups are scanned in the order given and the first one that has room
/// and shares at least two interests wins. Failing that, a new group is proposed
/// around the two interns with the largest overlap. Interns nobody overlaps with
/// go to the general group. Never fails; persisting the result is the caller's job.
pub fn assign_mentorship_group(
    candidate_id: &str,
    intern_interests: &[String],
    all_users: &[User],
    existing_groups: &[MentorshipGroup],
    id_generator: &dyn GroupIdGenerator,
) -> GroupPlacement {
    for group in existing_groups {
        if group.is_full() {
            continue;
        }

        let shared = shared_interests(intern_interests, &group.shared_interests);
        if shared.len() >= MIN_SHARED_INTERESTS {
            return GroupPlacement {
                group_id: group.id.clone(),
                group_name: group.name.clone(),
                shared_interests: shared,
                is_new_group: false,
            };
        }
    }

    let mut matches: Vec<(&User, usize)> = all_users
        .iter()
        .filter(|u| u.id != candidate_id && u.is_intern() && !u.interests.is_empty())
        .map(|u| (u, shared_interests(intern_interests, &u.interests).len()))
        .filter(|(_, overlap)| *overlap >= MIN_SHARED_INTERESTS)
        .collect();

    if matches.is_empty() {
        return GroupPlacement {
            group_id: GENERAL_GROUP_ID.to_string(),
            group_name: GENERAL_GROUP_NAME.to_string(),
            shared_interests: intern_interests.iter().take(FALLBACK_INTEREST_COUNT).cloned().collect(),
            is_new_group: false,
        };
    }

    // sort_by is stable, so equal overlaps keep the order of `all_users`
    matches.sort_by(|a, b| b.1.cmp(&a.1));
    let top: Vec<&User> = matches.iter().take(TOP_MATCHES).map(|(u, _)| *u).collect();

    let mut shared: Vec<String> = intern_interests
        .iter()
        .filter(|i| top.iter().all(|u| holds(&u.interests, i)))
        .cloned()
        .collect();

    if shared.len() < MIN_SHARED_INTERESTS {
        shared = shared_interests(intern_interests, &top[0].interests);
    }

    GroupPlacement {
        group_id: unique_group_id(id_generator, existing_groups),
        group_name: group_name_for(&shared),
        shared_interests: shared,
        is_new_group: true,
    }
}

fn group_name_for(shared: &[String]) -> String {
    match shared {
        [first, second, ..] => format!("{} & {}", first, second),
        [only] => only.clone(),
        [] => UNNAMED_GROUP.to_string(),
    }
}

fn unique_group_id(id_generator: &dyn GroupIdGenerator, existing_groups: &[MentorshipGroup]) -> String {
    let taken = |id: &str| id == GENERAL_GROUP_ID || existing_groups.iter().any(|g| g.id == id);

    let base = id_generator.next_id();
    if !taken(base.as_str()) {
        return base;
    }

    let mut suffix = 2;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !taken(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SequentialIds(AtomicUsize);

    impl SequentialIds {
        fn new() -> Self {
            Self(AtomicUsize::new(1))
        }
    }

    impl GroupIdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            format!("mg_{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    struct FixedId(&'static str);

    impl GroupIdGenerator for FixedId {
        fn next_id(&self) -> String {
            self.0.to_string()
        }
    }

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn user(id: &str, role: Role, interests: &[&str]) -> User {
        let mut u = User::new(id.to_string(), format!("{}@example.com", id), role);
        u.id = id.to_string();
        u.interests = tags(interests);
        u
    }

    fn intern(id: &str, interests: &[&str]) -> User {
        user(id, Role::Intern, interests)
    }

    fn group(id: &str, member_count: usize, shared: &[&str]) -> MentorshipGroup {
        let mut g = MentorshipGroup::new(id.to_string(), format!("Group {}", id), tags(shared));
        g.members = (0..member_count).map(|i| format!("{}-member-{}", id, i)).collect();
        g
    }

    #[test]
    fn test_joins_existing_group_with_exact_intersection() {
        let interests = tags(&["Python", "ML", "Design"]);
        let groups = vec![group("g1", 4, &["Python", "ML"])];

        let placement = assign_mentorship_group("me", &interests, &[], &groups, &SequentialIds::new());

        assert_eq!(placement.group_id, "g1");
        assert_eq!(placement.group_name, "Group g1");
        assert_eq!(placement.shared_interests, tags(&["Python", "ML"]));
        assert!(!placement.is_new_group);
    }

    #[test]
    fn test_full_group_is_skipped_and_new_group_created() {
        let interests = tags(&["Python", "ML", "Design"]);
        let groups = vec![group("g1", 6, &["Python", "ML"])];
        let users = vec![intern("peer", &["Python", "ML", "Cloud"])];

        let placement = assign_mentorship_group("me", &interests, &users, &groups, &SequentialIds::new());

        assert!(placement.is_new_group);
        assert_eq!(placement.group_id, "mg_1");
        assert_eq!(placement.group_name, "Python & ML");
        assert_eq!(placement.shared_interests, tags(&["Python", "ML"]));
    }

    #[test]
    fn test_full_group_is_skipped_in_favour_of_later_group() {
        let interests = tags(&["Python", "ML", "Design"]);
        let groups = vec![
            group("full", 6, &["Python", "ML", "Design"]),
            group("open", 5, &["ML", "Design", "Music"]),
        ];

        let placement = assign_mentorship_group("me", &interests, &[], &groups, &SequentialIds::new());

        assert_eq!(placement.group_id, "open");
        assert_eq!(placement.shared_interests, tags(&["ML", "Design"]));
    }

    #[test]
    fn test_first_matching_group_wins() {
        let interests = tags(&["Python", "ML", "Design", "Cloud"]);
        let groups = vec![
            group("weak", 2, &["Python", "Music"]),
            group("first", 3, &["Design", "Python"]),
            group("better", 1, &["Python", "ML", "Design", "Cloud"]),
        ];

        let placement = assign_mentorship_group("me", &interests, &[], &groups, &SequentialIds::new());

        assert_eq!(placement.group_id, "first");
        // candidate order, not group order
        assert_eq!(placement.shared_interests, tags(&["Python", "Design"]));
    }

    #[test]
    fn test_falls_back_to_general_group_when_nobody_overlaps() {
        let interests = tags(&["Chess", "Pottery", "Sailing", "Opera", "Baking"]);
        let users = vec![
            intern("a", &["Python", "ML"]),
            intern("b", &["Chess", "Go"]),
        ];
        let groups = vec![group("g1", 2, &["Chess", "Go"])];

        let placement = assign_mentorship_group("me", &interests, &users, &groups, &SequentialIds::new());

        assert_eq!(placement.group_id, GENERAL_GROUP_ID);
        assert_eq!(placement.group_name, GENERAL_GROUP_NAME);
        assert_eq!(placement.shared_interests, tags(&["Chess", "Pottery", "Sailing"]));
        assert!(!placement.is_new_group);
    }

    #[test]
    fn test_general_fallback_keeps_short_interest_lists_whole() {
        let interests = tags(&["Chess", "Pottery"]);

        let placement = assign_mentorship_group("me", &interests, &[], &[], &SequentialIds::new());

        assert_eq!(placement.group_id, GENERAL_GROUP_ID);
        assert_eq!(placement.shared_interests, tags(&["Chess", "Pottery"]));
    }

    #[test]
    fn test_candidate_and_non_interns_are_not_matches() {
        let interests = tags(&["Python", "ML", "Design"]);
        let users = vec![
            intern("me", &["Python", "ML", "Design"]),
            user("boss", Role::Manager, &["Python", "ML", "Design"]),
            user("hr", Role::HrAdmin, &["Python", "ML"]),
            intern("blank", &[]),
        ];

        let placement = assign_mentorship_group("me", &interests, &users, &[], &SequentialIds::new());

        assert_eq!(placement.group_id, GENERAL_GROUP_ID);
    }

    #[test]
    fn test_single_overlap_is_not_enough() {
        let interests = tags(&["Python", "ML", "Design"]);
        let users = vec![intern("peer", &["Python", "Cloud", "Music"])];
        let groups = vec![group("g1", 1, &["ML", "Music"])];

        let placement = assign_mentorship_group("me", &interests, &users, &groups, &SequentialIds::new());

        assert_eq!(placement.group_id, GENERAL_GROUP_ID);
    }

    #[test]
    fn test_new_group_uses_interests_common_to_top_two_matches() {
        let interests = tags(&["A", "B", "C", "D"]);
        let users = vec![
            intern("two", &["A", "B"]),
            intern("three", &["A", "B", "C"]),
            intern("four", &["D", "C", "B", "A"]),
        ];

        let placement = assign_mentorship_group("me", &interests, &users, &[], &SequentialIds::new());

        assert!(placement.is_new_group);
        assert_eq!(placement.shared_interests, tags(&["A", "B", "C"]));
        assert_eq!(placement.group_name, "A & B");
    }

    #[test]
    fn test_ties_keep_user_order_and_empty_three_way_overlap_uses_best_match() {
        let interests = tags(&["A", "B", "C"]);
        let users = vec![
            intern("first", &["A", "B"]),
            intern("second", &["B", "C"]),
            intern("third", &["A", "C"]),
        ];

        let placement = assign_mentorship_group("me", &interests, &users, &[], &SequentialIds::new());

        // first ∩ second ∩ candidate = [B], too thin, so fall back to candidate ∩ first
        assert!(placement.is_new_group);
        assert_eq!(placement.shared_interests, tags(&["A", "B"]));
        assert_eq!(placement.group_name, "A & B");
    }

    #[test]
    fn test_single_qualifying_match_forms_group() {
        let interests = tags(&["Rust", "Go", "Zig"]);
        let users = vec![
            intern("peer", &["Zig", "Rust"]),
            intern("other", &["Rust", "Haskell"]),
        ];

        let placement = assign_mentorship_group("me", &interests, &users, &[], &SequentialIds::new());

        assert!(placement.is_new_group);
        assert_eq!(placement.shared_interests, tags(&["Rust", "Zig"]));
        assert_eq!(placement.group_name, "Rust & Zig");
    }

    #[test]
    fn test_matching_ignores_case_and_keeps_candidate_spelling() {
        let interests = tags(&["Python", "ML", "Design"]);
        let groups = vec![group("g1", 2, &["python", "ml"])];

        let placement = assign_mentorship_group("me", &interests, &[], &groups, &SequentialIds::new());
        assert_eq!(placement.group_id, "g1");
        assert_eq!(placement.shared_interests, tags(&["Python", "ML"]));

        let users = vec![
            intern("a", &["PYTHON", "design"]),
            intern("b", &["python", "Design", "ml"]),
        ];
        let placement = assign_mentorship_group("me", &interests, &users, &[], &SequentialIds::new());
        assert!(placement.is_new_group);
        assert_eq!(placement.shared_interests, tags(&["Python", "Design"]));
        assert_eq!(placement.group_name, "Python & Design");
    }

    #[test]
    fn test_generated_id_never_collides_with_existing_groups() {
        let interests = tags(&["Python", "ML", "Design"]);
        let users = vec![intern("peer", &["Python", "ML"])];
        let groups = vec![
            group("mg_fixed", 6, &["Python", "ML"]),
            group("mg_fixed-2", 0, &["Cooking", "Hiking"]),
        ];

        let placement = assign_mentorship_group("me", &interests, &users, &groups, &FixedId("mg_fixed"));
        assert_eq!(placement.group_id, "mg_fixed-3");

        let placement = assign_mentorship_group("me", &interests, &users, &[], &FixedId(GENERAL_GROUP_ID));
        assert_eq!(placement.group_id, "general-2");
    }
}
