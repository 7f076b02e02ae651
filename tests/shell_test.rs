mod common;

use anyhow::Result;
use common::run_shell;

#[test]
fn test_startup_lists_seed_friends() -> Result<()> {
    let run = run_shell(&[], "")?;

    assert!(run.stdout.starts_with("Eat N' Split\n"));
    assert!(run.stdout.contains("You owe Clark 7€"));
    assert!(run.stdout.contains("Sarah owes you 20€"));
    assert!(run.stdout.contains("You and Anthony are even"));
    assert!(run.stderr.is_empty());
    Ok(())
}

#[test]
fn test_empty_session() -> Result<()> {
    let run = run_shell(&["--empty"], "list\n")?;
    assert!(run.stdout.contains("No friends yet."));
    assert!(!run.stdout.contains("Clark"));
    Ok(())
}

#[test]
fn test_split_bill_session() -> Result<()> {
    let script = "\
select Anthony
split --bill 100 --paid 40 --payer friend
history Anthony --format csv
";
    let run = run_shell(&[], script)?;

    assert!(run.stdout.contains("Split a bill with Anthony"));
    assert!(run.stdout.contains("Recorded -60€ with Anthony"));
    assert!(run.stdout.contains("You owe Anthony 60€"));
    assert!(run.stdout.contains("date,expense,amount"));
    assert!(run.stdout.contains(",Anthony,-60.00"));
    assert!(run.stderr.is_empty(), "stderr: {}", run.stderr);
    Ok(())
}

#[test]
fn test_form_edits_step_by_step() -> Result<()> {
    let script = "\
select 2
bill 100
paid 140
paid 40
form
payer friend
split
";
    let run = run_shell(&["--currency", "$"], script)?;

    assert!(run.stdout.contains("Sarah's expense:     60$"));
    assert!(run.stdout.contains("Who is paying:       Sarah"));
    assert!(run.stdout.contains("Recorded -60$ with Sarah"));
    assert!(run.stdout.contains("You owe Sarah 40$"));
    Ok(())
}

#[test]
fn test_split_needs_selection_and_amounts() -> Result<()> {
    let script = "\
split --bill 100 --paid 40
select Clark
split
";
    let run = run_shell(&[], script)?;

    assert!(run.stdout.contains("Select a friend to split a bill."));
    assert!(run.stdout.contains("Enter the bill value and your expense first."));
    assert!(!run.stdout.contains("Recorded"));
    Ok(())
}

#[test]
fn test_add_friend_from_shell() -> Result<()> {
    let script = r#"
add --name "Mary Jane" --email mj@example.com --phone 555-0100
add --address "1 Elm St, City"
list --format json
"#;
    let run = run_shell(&[], script)?;

    assert!(
        run.stdout
            .contains("Name, email, phone and address are all required. Nothing added.")
    );
    assert!(run.stdout.contains("Added Mary Jane"));
    assert!(run.stdout.contains(r#""name": "Mary Jane""#));
    assert!(run.stdout.contains(r#""status": "even""#));
    Ok(())
}

#[test]
fn test_errors_do_not_end_session() -> Result<()> {
    let script = "\
select Zoe
bill 10
list --format xml
frobnicate
select Sarah
bill ten
quit
list
";
    let run = run_shell(&[], script)?;

    assert!(run.stderr.contains("Friend not found: Zoe"));
    assert!(run.stderr.contains("Select a friend first"));
    assert!(run.stderr.contains("Unknown output format 'xml'"));
    assert!(run.stderr.contains("frobnicate"));
    assert!(run.stderr.contains("Invalid amount 'ten'"));
    assert!(run.stdout.contains("Split a bill with Sarah"));
    // Nothing after quit runs
    assert_eq!(run.stdout.matches("[Add friend]").count(), 1);
    Ok(())
}

#[test]
fn test_deselect() -> Result<()> {
    let run = run_shell(&[], "select Clark\nselect clark\nform\n")?;
    assert!(run.stdout.contains("Selection cleared."));
    assert!(run.stdout.contains("Select a friend to split a bill."));
    Ok(())
}

#[test]
fn test_out_of_range_amounts_keep_shell_running() -> Result<()> {
    let script = "\
select Clark
bill 1
paid -92233720368547758
select Clark
select Sarah
split --bill 92233720368547758 --paid 1
split --bill 92233720368547758 --paid 1
select Anthony
bill -5
split
list --format csv
";
    let run = run_shell(&[], script)?;

    assert!(run.stdout.contains("Clark's expense:     1€"));
    assert!(!run.stdout.contains("Recorded"));
    assert!(run.stdout.contains("1,118836,Clark,-7.00,you_owe,false"));
    assert!(run.stdout.contains("2,933372,Sarah,20.00,owes_you,false"));
    assert!(run.stdout.contains("3,499476,Anthony,0.00,even,true"));
    assert!(run.stderr.is_empty(), "stderr: {}", run.stderr);
    Ok(())
}
