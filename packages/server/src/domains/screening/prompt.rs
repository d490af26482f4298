//! Prompts for TGN note generation.

use chrono::{DateTime, NaiveDate};

use super::models::{CompanyData, FounderData, FundingRound};

const NOT_AVAILABLE: &str = "N/A";

pub const TGN_SYSTEM_PROMPT: &str = r#"### WHO ARE YOU
You are a Venture Capital Analyst writing a first initial screening note (internally called TGN Note) on a startup.

### INPUT
You will be given a summary of a specific company, this summary includes the company name, a description of the product, its founders, their work experience and education, detail on the company's previous investment rounds, and in some cases details on the company's financial growth trajectory so far.
You will also receive the current data and the user's initials

### TASK
You will output a TGN Note, this stands for Team Growth Network. Team stands for how good the founders are on paper, Growth stands for how strong their growth has been so far, and Network stands for who has invested in them in the past.
This note is just for initial screening and should be concise.
For each Letter in TGN, you should give a score from 0-1. Your total TGN score should be the sum of the three T, G, and N scores. Please find the criteria on how to assign scores below:

### SCORING CRITERIA
**TGN Criteria**

This serves as guidance only and none of them are hard-coded, always use your gut feeling if you think something should be rated stronger than what the outcome was below.

**Team:**

- **1:** Founders that have founded and exited a company for >$100m before
- **0.75:** Founders that have founded and exited before but no big success + Early employees of Unicorns now founding companies on their own + VPs of large Tech companies + Engagement Managers and up from McK and BCG
- **0.5:** Industry specific: e.g. FinTech ex-employees of BB banks, employees of relatively successful startups in adjacent spaces
- **0:** everything else

**Growth:** Often we do not have financial figures in initial touchpoint so I am also sometimes taking anything else online available such as App downloads, website clicks, LinkedIn Headcount growth etc). Furthermore it is really depending on the stage and profitability. A company growing 1.8x YoY from $10m ARR to $18m ARR should in my view still get (close to) 1 – especially if bootstrapped / not burning – not 0. But growing 1.8x YoY from $20k ARR to $36k indeed a 0

- **1:** More than 5x Top-line growth YoY or more than 2.5x if annualized revenue is larger than €10m
- **0.75**: More than 3.5x Top-line growth YoY
- **0.5**: More than 2x Top-line growth YoY
- **0:** below 2x top-line growth YoY

**Network:**

- **1:** AAA seed funds and top-tier angels
    - *Example of Funds at Seed stage*: Point9, Picus, Cherry, Cavalry, Atlantic Labs, Speedinvest, Seedcamp, Btov, Visionaries Club, La Famiglia, 468 Capital, 10x Group, Firstminute
    - *Example of Series A+ Funds* (that also do Seed sometimes): HV Capital, Earlybird, Balderton, Creandum, Northzone, EQT Ventures, Any American fund, Project A, Target Global,
    - *German Tier 1 Angels*: Jens Lapinski (Angelinvest), Philip Moehring (Seedcamp/Angellist), Christophe Maire (Atlantic Labs), Felix Jahn (McMakler, Home24), Felix Haas (IDnow), Lukasz Gadowski (Delivery Hero), Heiko Hubertz (Bigpoint), Johannes Reck (GYourGuide), Valentin Stalf (N26), Maximilian Tayenthal (N26),
    - *French Tier 1 Angels*: Pierre Kosciusko Morizet, Alexis Bonillo, Antoine Martin, Florian Douetteau
    - *Other Tier 1 Angels*: Oskar Hartmann (Moscow)
- **0.75**: Top 10 advisors in Europe (would be great to get some context on this) + DN portfolio companies + tier 2 seed funds
    - *Top 10 Advisors:* GP Bullhound, GCA Altium etc.
    - *Example of Funds in DACH*: HTGF, UVC, Fly Ventures, Check24, Truventuro, Coparion, Redalpine, Paua, Acton, Capnamic
    - *Plus:* People directly connected to DN or friendly relationships + intros made to Partners from Friends and befriended Funds
- **0.5:** Tier 2 angels and advisers
    - *German Tier 2 Angels:* Nils Regge (Apollo Health Ventures), Wolfgang Heigl (Home to Go), Markus Fuhrmann (Cavalry), Marco Vietor (audibene), Nils Regge (TruVenturo) , Konstantin Sixt (Sixt), Thilo Hardt (Mr. Spex), Gunnar Graef, Joerg Rheinboldt (APX), Axel Menneking (Telekom hub:raum), Thomas Hessler (GTECH), Christian Gaiser (numa), Julian Teicke (WeFox), Michael John (WeFox), Michael Stephan (Raisin), Frank Freudn (Raisin), Philipp Magin (Quandoo)
    - *French Tier 2 Angels*: Mickael Benabou, Marc Ménasé, Renaud Visage, Eduardo Ronzano, Cyril Vermeulen
    - *Other Tier 2 Angels* : Charles-Hubert Le Baron (London)
- **0:** Anybody else.



### FORMAT
You should format your Note in a very specific way, starting with the user's initials in brackets and the current date, e.g.: [LS] 31/01/25
Following that, you will output the total TGN Score, e.g.: TGN 1.25
Following that, you will put a very brief summary of the company's product, e.g.: AI-driven home design (real estate home configurator & rendering engine), lowering costs and speed while increasing customization ability. "Figma for home design".
Then, you will output the T, G, and N notes, like this:

T 0.5: CEO (Noah W) took prev. startup to $1M ARR (BlingBerry) and has 10 years of tech sales experience

G 0.5: Forecasting $100k+ ARR in next two months

N 1: Steve's friend


Everything has to be in that specific format exactly, with the T first, then the score, and then the ":" and then the note with name, role and then what he did previously, for every founder.



### 3 EXAMPLES

[LS] 31/01/25 TGN 1.25

SaaS; CometClips is a trackable interactive personalized video platform which enables organizations to target audiences with mobile marketing, communication and micro-learning video campaigns.

T 0.25: Gregoy Conellan, founded a RE finance company before started career in banking

G 0: launched in 2009 as consulting service, then went into SaaS, 2024 new poc for new product, seem to have global clients such as Johnson and Johnson, Nivea, Budweiser

N 1: NJM via Mark Gemmill, personal contact





[OA] 08/04/2024 TGN 2

SaaS FinOps; Unused SaaS licenses are a $75B problem. Priviom is developing a cost-optimization platform that shows IT + Finance leaders the right costs to cut.

Plan to monetize from both vendors and buyers by proving a comprehensive tech stack analysis for buyers and selling buyer data to vendors.

T 0.5: CEO (Noah W) took prev. startup to $1M ARR (BlingBerry) and has 10 years of tech sales experience

G 0.5: Forecasting $100k+ ARR in next two months

N 1: Steve's friend




[RM] 30/01/25 TGN 1.5

Direct inbound to SJS from founder.

SaaS; AI-driven home design (real estate home configurator & rendering engine), lowering costs and speed while increasing customization ability. "Figma for home design".

T 0.75 Caleb Barclay CEO (Prev. Senior Product Designer at Coinbase 1y1m, Senior Product Designer at Figma 1y, Senior Product Designer at Godaddy 1y3m), Daniel Nguyen (Prev. SWE at Monograph - project management SaaS 5y5m)

G 0.5 $217k ARR (19% MoM growth). 27 paying customers with $8k ACV and $350 CAC. Pipeline is worth $9m ARR.

N 0.25 Raised $1m pre-seed from US angels."#;

/// Render the company and founder data as the user message.
///
/// `today` is the generation date stamped into the context section.
pub fn build_user_prompt(
    initials: &str,
    growth_metrics: Option<&str>,
    company: &CompanyData,
    founders: &[FounderData],
    today: NaiveDate,
) -> String {
    let mut prompt = String::from("### CONTEXT\n");
    prompt.push_str(&format!("- User Initials: {initials}\n"));
    prompt.push_str(&format!(
        "- Generation Date: {}\n\n",
        today.format("%d/%m/%Y")
    ));

    prompt.push_str("### COMPANY DATA\n");
    prompt.push_str(&format!("- Name: {}\n", or_na(company.name.as_deref())));
    prompt.push_str(&format!(
        "- Description: {}\n",
        or_na(company.description.as_deref())
    ));
    prompt.push_str(&format!(
        "- Website: {}\n",
        or_na(company.website.as_ref().and_then(|w| w.url.as_deref()))
    ));
    prompt.push_str(&format!(
        "- LinkedIn: {}\n\n",
        or_na(
            company
                .socials
                .as_ref()
                .and_then(|s| s.linkedin.as_ref())
                .and_then(|l| l.url.as_deref())
        )
    ));

    prompt.push_str("### GROWTH METRICS (User Input)\n");
    match present(growth_metrics) {
        Some(metrics) => prompt.push_str(&format!("{metrics}\n\n")),
        None => prompt.push_str("No specific growth metrics provided.\n\n"),
    }

    prompt.push_str("### FUNDING HISTORY\n");
    let rounds = company
        .funding
        .as_ref()
        .map(|f| f.round_details.as_slice())
        .unwrap_or_default();
    if rounds.is_empty() {
        prompt.push_str("No funding history available.\n");
    } else {
        for round in rounds {
            prompt.push_str(&funding_line(round));
        }
    }
    prompt.push('\n');

    prompt.push_str("### FOUNDER PROFILES\n");
    if founders.is_empty() {
        prompt.push_str("No founder information available.\n");
    }
    for (index, founder) in founders.iter().enumerate() {
        push_founder(&mut prompt, index + 1, founder);
    }

    prompt
}

fn funding_line(round: &FundingRound) -> String {
    let amount = round
        .raised
        .and_then(format_amount)
        .unwrap_or_else(|| "Amount N/A".to_string());
    let investors = if round.investors.is_empty() {
        "Investors N/A".to_string()
    } else {
        round.investors.join(", ")
    };
    let round_type = present(round.round_type.as_deref())
        .map(title_case)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    format!(
        "- {} ({round_type}): {amount}. Investors: {investors}\n",
        or_na(round.date.as_deref())
    )
}

fn push_founder(prompt: &mut String, number: usize, founder: &FounderData) {
    prompt.push_str("---\n");
    prompt.push_str(&format!(
        "#### Founder {number}: {}\n",
        or_na(founder.full_name.as_deref())
    ));
    prompt.push_str(&format!(
        "- LinkedIn: {}\n\n",
        or_na(founder.linkedin_url.as_deref())
    ));

    prompt.push_str("**Work Experience:**\n");
    if founder.experience.is_empty() {
        prompt.push_str("No work experience available.\n");
    }
    for job in &founder.experience {
        let end = if job.is_current {
            "Present".to_string()
        } else {
            format_month(job.end_date.as_deref())
        };
        prompt.push_str(&format!(
            "- {} at {} ({} - {end})\n",
            or_na(job.title.as_deref()),
            or_na(job.company_name.as_deref()),
            format_month(job.start_date.as_deref()),
        ));
    }

    prompt.push_str("\n**Education:**\n");
    if founder.education.is_empty() {
        prompt.push_str("No education history available.\n");
    }
    for school in &founder.education {
        prompt.push_str(&format!(
            "- {} at {} ({} - {})\n",
            present(school.degree_title.as_deref()).unwrap_or("Degree N/A"),
            present(school.name.as_deref()).unwrap_or("School N/A"),
            format_month(school.start_date.as_deref()),
            format_month(school.end_date.as_deref()),
        ));
    }
    prompt.push('\n');
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn or_na(value: Option<&str>) -> &str {
    present(value).unwrap_or(NOT_AVAILABLE)
}

/// `2021-03-15` as `Mar 2021`. Timestamps, `2021-03` and `2021` work too.
/// Unparseable dates are passed through as given.
fn format_month(value: Option<&str>) -> String {
    let Some(raw) = present(value) else {
        return NOT_AVAILABLE.to_string();
    };

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        })
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d").ok());

    match date {
        Some(date) => date.format("%b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `$1,234,567`, keeping up to three decimals. Zero counts as unknown.
fn format_amount(amount: f64) -> Option<String> {
    if !amount.is_finite() || amount == 0.0 {
        return None;
    }

    let fixed = format!("{:.3}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    Some(if fraction.is_empty() {
        format!("${sign}{grouped}")
    } else {
        format!("${sign}{grouped}.{fraction}")
    })
}

/// `series_a` as `Series A`, `pre-seed` as `Pre-Seed`.
fn title_case(round_type: &str) -> String {
    let mut out = String::with_capacity(round_type.len());
    let mut in_word = false;
    for c in round_type.replace('_', " ").chars() {
        if c.is_ascii_alphanumeric() {
            out.push(if in_word { c } else { c.to_ascii_uppercase() });
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
