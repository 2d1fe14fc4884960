use almanac::{DateTime, Delta, Hours, Months, Years};

fn main() {
    let now = DateTime::now();
    let next_month = now + Months(1);
    let deadline = now + (Delta::default() + Years(1) + Hours(-6));

    println!("now:        {now}");
    println!("next month: {}", next_month.strftime("%A %d %B %Y"));
    println!("deadline:   {}", deadline.strftime("%F %T %Z"));
    println!("days left:  {}", deadline - now);
}
