// Runs the real fine-tuned heads. Needs `models/{mood,risk,emotion}_model.pt`
// and network access to the Hugging Face Hub for the tokenizer and config.

use mood_api::pipelines::global_cache;
use mood_api::pipelines::utils::DeviceSelectable;
use mood_api::AffectPipelineBuilder;

#[tokio::test]
#[ignore = "requires fine-tuned weights in ./models"]
async fn scores_stay_within_their_ranges() -> anyhow::Result<()> {
    let pipeline = AffectPipelineBuilder::new("models").cpu().build().await?;

    let text = pipeline.predict_text("I finally slept well and feel hopeful.")?;
    assert!((1.0..=5.0).contains(&text.mood_score));
    assert!((0.0..=1.0).contains(&text.risk_score));
    assert_eq!(text.emotion_scores.iter().count(), 12);

    let paragraph = pipeline
        .predict_paragraph("Work was exhausting. Dinner with friends cheered me up!")?;
    assert_eq!(paragraph.mood.moods.len(), 2);
    assert!(paragraph.mood.stats.mood_strength >= 0.0);
    Ok(())
}

#[tokio::test]
#[ignore = "requires fine-tuned weights in ./models"]
async fn rebuilding_reuses_loaded_heads() -> anyhow::Result<()> {
    global_cache().clear().await;

    let _first = AffectPipelineBuilder::new("models").cpu().build().await?;
    let _second = AffectPipelineBuilder::new("models").cpu().build().await?;

    assert_eq!(global_cache().len().await, 3);
    Ok(())
}
