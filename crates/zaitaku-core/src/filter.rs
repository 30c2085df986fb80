use chrono::Utc;

use crate::models::{JobRecord, Source};

/// Runs that collect fewer live records than this get the sample set appended.
pub const MIN_RECORDS: usize = 3;

/// Keep records that are both remote and own-PC friendly, preserving order.
pub fn filter_remote(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let before = records.len();
    let filtered: Vec<JobRecord> = records.into_iter().filter(JobRecord::is_eligible).collect();
    tracing::info!("Filtered {} -> {} records", before, filtered.len());
    filtered
}

/// Append the fixed sample set when fewer than [`MIN_RECORDS`] were collected.
///
/// Samples carry [`Source::SampleData`] so they are distinguishable from
/// scraped listings in the output.
pub fn ensure_minimum(mut records: Vec<JobRecord>) -> Vec<JobRecord> {
    if records.len() < MIN_RECORDS {
        tracing::info!(
            collected = records.len(),
            "Too few records collected, adding sample data"
        );
        let samples = sample_jobs();
        tracing::info!("Added {} sample records", samples.len());
        records.extend(samples);
    }
    records
}

/// The three fixed sample listings.
pub fn sample_jobs() -> Vec<JobRecord> {
    let now = Utc::now();
    let sample = |title: &str, company: &str, category: &str, description: &str, n: u32| {
        JobRecord {
            title: title.to_string(),
            company: company.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            link: format!("https://example.com/job{n}"),
            is_remote: true,
            is_own_pc_ok: true,
            scraped_at: now,
            source: Source::SampleData,
        }
    };

    vec![
        sample(
            "フルリモート Webエンジニア募集",
            "テックスタートアップ株式会社",
            "エンジニア・開発",
            "フルリモート勤務可能。React/Node.jsを使った自社プロダクト開発。自宅PC使用OK。",
            1,
        ),
        sample(
            "在宅ライター・コンテンツ作成",
            "デジタルマーケティング株式会社",
            "ライティング・編集",
            "完全在宅勤務。SEO記事作成、自宅環境での作業が中心。PC環境は各自準備。",
            2,
        ),
        sample(
            "リモート カスタマーサポート",
            "グローバルテック合同会社",
            "カスタマーサポート",
            "フルリモート勤務。チャット・メールサポート対応。自宅PC利用可能。",
            3,
        ),
    ]
}
