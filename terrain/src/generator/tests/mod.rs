mod seam_tests;
