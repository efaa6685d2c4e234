//! Canned API documents

use serde_json::{json, Value};

pub fn metadata_doc() -> Value {
    json!({
        "top": {
            "accuracy": 90,
            "questions_asked": 9,
            "total_questions": 10,
            "documentation_errors": 1,
            "critical_errors": 2,
            "duration": "10:30"
        },
        "speaker": {"agent_seconds": 300, "agent_pct": 47.6, "doctor_wpm": 135},
        "mer_pdf_url": "/files/mer.pdf"
    })
}

pub fn report_doc() -> Value {
    json!({
        "summary": {
            "critical_issues": ["Disclaimer not read"],
            "recommendations": ["Confirm nominee details"]
        },
        "qa_matrix": [
            {"question_id": "Q1", "question_text": "Any surgeries?", "status": "Correct",
             "timestamp": "0:05"},
            {"question_id": "Q2", "question_text": "Any medication?", "status": "Incorrect",
             "timestamp": "1:00"},
            {"question_id": "PP.1", "question_text": "Nominee?", "status": "Missing",
             "expected_response": "N/A"}
        ]
    })
}

pub fn transcript_doc() -> Value {
    json!({
        "segments": [
            {"speaker": "Agent", "start_timestamp": "0:00", "text": "Good morning"},
            {"speaker": "Customer", "start_timestamp": "0:05", "text": "Morning"},
            {"speaker": "Agent", "start_timestamp": "1:00", "text": "Any medication?"}
        ]
    })
}

pub fn qc_doc(greetings: &str) -> Value {
    json!({
        "qc_parameters": {
            "greetings": {"value": greetings, "timestamps": ["0:00"]},
            "disclaimer": {"value": "No", "explanation": "Not read"}
        }
    })
}

pub fn record_doc() -> Value {
    json!({
        "id": "R1",
        "calls": [{"index": 1, "duration_sec": 630}],
        "aggregate": {"total_score": 1450, "max_score": 1600, "percentage": 90.63,
                      "category": "Above Average", "breakdown": {"greetings": 100}},
        "merged": {"qc": qc_doc("Partial")},
        "final_decision": {"OPS_ATTENTION": [{"issue": "Customer hesitated"}]}
    })
}
