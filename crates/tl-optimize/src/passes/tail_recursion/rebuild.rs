use std::ptr;

use tl_core::ast::{CommentPosition, Expression, Statement, StmtReturn, Trivia};

/// Assembles the iterative body:
///
/// ```text
/// for <condition> {
///     <staging>
///     <original body minus the guard and the tail-call return>
/// }
/// <base return>
/// ```
///
/// `guard` and `tail` are matched by identity, so only those two statements
/// are removed even if the body holds structurally equal copies. Comments
/// travel with the code they annotate: the guard's onto the loop, the tail
/// call's onto the staged update.
pub fn rebuild_body(
    original: &[Statement],
    guard: &Statement,
    tail: &Statement,
    condition: Expression,
    staging: Vec<Statement>,
    base_return: &StmtReturn,
) -> Vec<Statement> {
    let mut loop_body = staging;
    if original.iter().any(|stmt| ptr::eq(stmt, tail)) {
        carry_tail_comments(tail.trivia(), &mut loop_body);
    }
    loop_body.extend(
        original
            .iter()
            .filter(|stmt| !ptr::eq(*stmt, guard) && !ptr::eq(*stmt, tail))
            .cloned(),
    );

    let mut base = base_return.clone();
    base.trivia.blank_line_before = false;
    // a comment on the guard's `{` line ends up trailing the return
    let (same_line, leading) = base
        .trivia
        .leading
        .drain(..)
        .partition::<Vec<_>, _>(|comment| comment.position == CommentPosition::SameLine);
    base.trivia.leading = leading;
    let mut trailing = same_line;
    trailing.append(&mut base.trivia.trailing);
    base.trivia.trailing = trailing;

    vec![
        Statement::looping(condition, loop_body).with_trivia(guard.trivia().clone()),
        Statement::Return(base),
    ]
}

fn carry_tail_comments(trivia: &Trivia, staging: &mut Vec<Statement>) {
    if trivia.leading.is_empty() && trivia.trailing.is_empty() {
        return;
    }
    if staging.is_empty() {
        let mut comments = trivia.leading.clone();
        comments.extend(trivia.trailing.iter().cloned());
        for comment in &mut comments {
            if comment.position == CommentPosition::SameLine {
                comment.position = CommentPosition::NextLine;
            }
        }
        staging.push(Statement::opaque("").with_trivia(Trivia {
            trailing: comments,
            ..Trivia::default()
        }));
        return;
    }
    if let Some(first) = staging.first_mut() {
        let leading = &mut first.trivia_mut().leading;
        let mut carried = trivia.leading.clone();
        carried.append(leading);
        *leading = carried;
    }
    if let Some(last) = staging.last_mut() {
        last.trivia_mut()
            .trailing
            .extend(trivia.trailing.iter().cloned());
    }
}
